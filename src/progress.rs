use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType::Lanczos3, ExtendedColorType, ImageFormat, ImageReader};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::models::{buffer::PixelBuffer, genome::Genome};

/// What the engine knows at snapshot time.
#[derive(Debug, Clone)]
pub struct Progress {
    pub generation: usize,
    pub fitness: u64,
    pub pool_size: usize,
    pub elapsed: Duration,
}

/// Receives the tracked best at the snapshot cadence. The engine stays
/// free of file and terminal concerns; sinks own them.
pub trait ProgressSink<G: Genome> {
    fn emit(&mut self, best: &G, progress: &Progress) -> anyhow::Result<()>;
}

/// Discards everything. Used when nobody watches the run.
pub struct NullSink;

impl<G: Genome> ProgressSink<G> for NullSink {
    fn emit(&mut self, _best: &G, _progress: &Progress) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes the best render and its genome to disk on every snapshot,
/// overwriting the previous pair, and logs one line per snapshot.
pub struct SnapshotSink {
    pub image_path: PathBuf,
    pub genome_path: PathBuf,
    pub preview: bool,
}

impl SnapshotSink {
    pub fn new(image_path: PathBuf, preview: bool) -> SnapshotSink {
        let genome_path = image_path.with_extension("json");
        SnapshotSink {
            image_path,
            genome_path,
            preview,
        }
    }
}

impl<G: Genome> ProgressSink<G> for SnapshotSink {
    fn emit(&mut self, best: &G, progress: &Progress) -> anyhow::Result<()> {
        save_png(&self.image_path, best.pixels())?;
        save_genome(&self.genome_path, best)?;
        if self.preview {
            print_inline(best.pixels())?;
        }
        info!(
            generation = progress.generation,
            fitness = progress.fitness,
            pool_size = progress.pool_size,
            elapsed_ms = progress.elapsed.as_millis() as u64,
            "snapshot"
        );
        Ok(())
    }
}

pub fn load_target(path: &Path, max_w: usize, max_h: usize) -> anyhow::Result<PixelBuffer> {
    let mut img = ImageReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .decode()
        .with_context(|| format!("failed to decode {}", path.display()))?;

    // downscale if source image is too large
    if img.width() as usize > max_w || img.height() as usize > max_h {
        img = img.resize(max_w as u32, max_h as u32, Lanczos3);
    }

    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(PixelBuffer::from_raw(
        width,
        height,
        img.into_rgba8().into_raw(),
    ))
}

pub fn save_png(path: &Path, buffer: &PixelBuffer) -> anyhow::Result<()> {
    image::save_buffer(
        path,
        &buffer.data,
        buffer.width as u32,
        buffer.height as u32,
        ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("failed to write {}", path.display()))
}

pub fn save_genome<G: Genome>(path: &Path, genome: &G) -> anyhow::Result<()> {
    let json = serde_json::to_string(genome)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn load_genome<G: DeserializeOwned>(path: &Path) -> anyhow::Result<G> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}

/// Inline image escape sequence; iTerm2 only, everything else prints noise.
pub fn print_inline(buffer: &PixelBuffer) -> anyhow::Result<()> {
    let mut png: Vec<u8> = vec![];
    image::write_buffer_with_format(
        &mut Cursor::new(&mut png),
        &buffer.data,
        buffer.width as u32,
        buffer.height as u32,
        ExtendedColorType::Rgba8,
        ImageFormat::Png,
    )
    .context("failed to encode preview")?;
    println!("\x1b]1337;File=inline=1:{}\x07", STANDARD.encode(&png));
    Ok(())
}
