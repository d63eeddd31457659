use crate::models::{buffer::PixelBuffer, color::Color, point::Point, triangle::Triangle};

// Rasterization based on half space functions, restricted to triangles.
// Walks the bounding rectangle clipped to the canvas and keeps pixels whose
// three edge cross products agree in sign (boundary pixels included).
// https://web.archive.org/web/20050907040950/http://sw-shader.sourceforge.net:80/rasterizer.html
pub fn fill_triangle(buffer: &mut PixelBuffer, triangle: &Triangle) {
    let w = buffer.width as i32;
    let h = buffer.height as i32;
    let Triangle { p1, p2, p3, color } = triangle;

    // vertices may sit outside the canvas
    let min_x = p1.x.min(p2.x).min(p3.x).max(0);
    let max_x = p1.x.max(p2.x).max(p3.x).min(w - 1);
    let min_y = p1.y.min(p2.y).min(p3.y).max(0);
    let max_y = p1.y.max(p2.y).max(p3.y).min(h - 1);
    if min_x > max_x || min_y > max_y {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let d1 = edge(p1, p2, x, y);
            let d2 = edge(p2, p3, x, y);
            let d3 = edge(p3, p1, x, y);
            let has_neg = d1 < 0 || d2 < 0 || d3 < 0;
            let has_pos = d1 > 0 || d2 > 0 || d3 > 0;
            if !(has_neg && has_pos) {
                let index = buffer.index_of(x as usize, y as usize);
                fill_pixel(&mut buffer.data, index, color);
            }
        }
    }
}

// cross product of (b - a) x (p - a); the sign tells which side of ab p is on
fn edge(a: &Point, b: &Point, x: i32, y: i32) -> i64 {
    (b.x - a.x) as i64 * (y - a.y) as i64 - (b.y - a.y) as i64 * (x - a.x) as i64
}

/// Source-over blend of `color` into the four bytes at `index`, integer
/// round-to-nearest.
pub fn fill_pixel(buffer: &mut [u8], index: usize, color: &Color) {
    if buffer.len() <= index + 3 {
        return;
    }
    let a = color.a as u32;
    if a == 0 {
        return;
    }
    let ia = 255 - a;
    buffer[index] = ((color.r as u32 * a + buffer[index] as u32 * ia + 127) / 255) as u8;
    buffer[index + 1] = ((color.g as u32 * a + buffer[index + 1] as u32 * ia + 127) / 255) as u8;
    buffer[index + 2] = ((color.b as u32 * a + buffer[index + 2] as u32 * ia + 127) / 255) as u8;
    let da = buffer[index + 3] as u32;
    buffer[index + 3] = u32::min(a + (da * ia + 127) / 255, 255) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::{BLACK, RED};

    fn opaque(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    fn pixel(buffer: &PixelBuffer, x: usize, y: usize) -> Color {
        let i = buffer.index_of(x, y);
        Color::from(&buffer.data[i..i + 4])
    }

    #[test]
    fn fills_a_right_triangle_inside_the_canvas() {
        let mut buffer = PixelBuffer::new(8, 8);
        let tri = Triangle {
            p1: Point { x: 0, y: 0 },
            p2: Point { x: 7, y: 0 },
            p3: Point { x: 0, y: 7 },
            color: opaque(10, 20, 30),
        };
        fill_triangle(&mut buffer, &tri);
        assert_eq!(pixel(&buffer, 0, 0), opaque(10, 20, 30));
        assert_eq!(pixel(&buffer, 3, 3), opaque(10, 20, 30));
        // past the hypotenuse nothing is touched
        assert_eq!(pixel(&buffer, 7, 7), BLACK);
    }

    #[test]
    fn clips_vertices_outside_the_canvas() {
        let mut buffer = PixelBuffer::new(4, 4);
        let tri = Triangle {
            p1: Point { x: -10, y: -10 },
            p2: Point { x: 20, y: -10 },
            p3: Point { x: -10, y: 20 },
            color: RED,
        };
        fill_triangle(&mut buffer, &tri);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(pixel(&buffer, x, y), RED);
            }
        }
    }

    #[test]
    fn a_triangle_entirely_off_canvas_draws_nothing() {
        let mut buffer = PixelBuffer::new(4, 4);
        let tri = Triangle {
            p1: Point { x: -9, y: -9 },
            p2: Point { x: -2, y: -9 },
            p3: Point { x: -9, y: -2 },
            color: RED,
        };
        fill_triangle(&mut buffer, &tri);
        assert!(buffer.data.iter().all(|b| *b == 0));
    }

    #[test]
    fn later_triangles_draw_over_earlier_ones() {
        let mut buffer = PixelBuffer::new(4, 4);
        let cover = |color| Triangle {
            p1: Point { x: -10, y: -10 },
            p2: Point { x: 20, y: -10 },
            p3: Point { x: -10, y: 20 },
            color,
        };
        fill_triangle(&mut buffer, &cover(RED));
        fill_triangle(&mut buffer, &cover(opaque(0, 0, 200)));
        assert_eq!(pixel(&buffer, 2, 2), opaque(0, 0, 200));
    }

    #[test]
    fn zero_alpha_leaves_the_buffer_untouched() {
        let mut buffer = PixelBuffer::new(4, 4);
        let tri = Triangle {
            p1: Point { x: 0, y: 0 },
            p2: Point { x: 3, y: 0 },
            p3: Point { x: 0, y: 3 },
            color: BLACK,
        };
        fill_triangle(&mut buffer, &tri);
        assert!(buffer.data.iter().all(|b| *b == 0));
    }

    #[test]
    fn blends_a_half_transparent_color() {
        let mut buffer = vec![100u8, 100, 100, 255];
        fill_pixel(
            &mut buffer,
            0,
            &Color {
                r: 200,
                g: 0,
                b: 0,
                a: 128,
            },
        );
        assert_eq!(buffer, vec![150, 50, 50, 255]);
    }
}
