use egui::{pos2, Color32, Mesh, Pos2, Rect, TextureId};
use image::{Rgba, RgbaImage};
use motion_core::{BlendMode, SpriteDraw, SpriteSink};

pub const SPARK_SIZE: u32 = 64;

/// White radial spark with a soft quadratic falloff to transparent edges.
pub fn spark_image(size: u32) -> RgbaImage {
    let centre = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - centre;
        let dy = y as f32 - centre;
        let distance = (dx * dx + dy * dy).sqrt() / radius;
        let falloff = (1.0 - distance).clamp(0.0, 1.0);
        Rgba([255, 255, 255, (falloff * falloff * 255.0).round() as u8])
    })
}

pub fn spark_color_image(size: u32) -> egui::ColorImage {
    let image = spark_image(size);
    egui::ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

/// Collects sprite draws into one textured mesh for the painter.
pub struct MeshSink {
    mesh: Mesh,
    origin: Pos2,
    sprite_size: egui::Vec2,
    blend: BlendMode,
}

impl MeshSink {
    pub fn new(texture: TextureId, origin: Pos2, sprite_size: egui::Vec2) -> Self {
        Self {
            mesh: Mesh::with_texture(texture),
            origin,
            sprite_size,
            blend: BlendMode::Additive,
        }
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    fn vertex_color(&self, draw: &SpriteDraw) -> Option<Color32> {
        let opacity = draw.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return None;
        }
        let channel = |value: f32| (value.clamp(0.0, 1.0) * opacity * 255.0).round() as u8;
        let (r, g, b) = (channel(draw.tint.x), channel(draw.tint.y), channel(draw.tint.z));
        Some(match self.blend {
            // Zero alpha with premultiplied colour adds onto the framebuffer.
            BlendMode::Additive => Color32::from_rgba_premultiplied(r, g, b, 0),
        })
    }
}

impl SpriteSink for MeshSink {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        let Some(color) = self.vertex_color(draw) else {
            return;
        };
        let centre = self.origin + egui::vec2(draw.position.x, draw.position.y);
        let rect = Rect::from_center_size(centre, self.sprite_size);
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        self.mesh.add_rect_with_uv(rect, uv, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec4};

    fn draw(opacity: f32) -> SpriteDraw {
        SpriteDraw {
            position: Vec2::new(10.0, 20.0),
            tint: Vec4::new(1.0, 0.5, 0.0, 1.0),
            opacity,
        }
    }

    #[test]
    fn spark_is_opaque_in_the_middle_and_clear_at_corners() {
        let image = spark_image(SPARK_SIZE);
        let middle = image.get_pixel(SPARK_SIZE / 2, SPARK_SIZE / 2)[3];
        assert!(middle > 240, "middle alpha {middle}");
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(SPARK_SIZE - 1, SPARK_SIZE - 1)[3], 0);
    }

    #[test]
    fn additive_sprite_has_zero_alpha() {
        let mut sink = MeshSink::new(TextureId::default(), Pos2::ZERO, egui::vec2(8.0, 8.0));
        sink.set_blend_mode(BlendMode::Additive);
        sink.draw_sprite(&draw(1.0));
        let mesh = sink.into_mesh();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.vertices.iter().all(|vertex| vertex.color.a() == 0));
        assert_eq!(mesh.vertices[0].color.r(), 255);
    }

    #[test]
    fn sprite_is_centred_on_draw_position_relative_to_origin() {
        let mut sink = MeshSink::new(TextureId::default(), pos2(100.0, 0.0), egui::vec2(8.0, 8.0));
        sink.draw_sprite(&draw(1.0));
        let bounds = sink.into_mesh().calc_bounds();
        assert_eq!(bounds.center(), pos2(110.0, 20.0));
    }

    #[test]
    fn faded_out_sprites_are_skipped() {
        let mut sink = MeshSink::new(TextureId::default(), Pos2::ZERO, egui::vec2(8.0, 8.0));
        sink.draw_sprite(&draw(0.0));
        sink.draw_sprite(&draw(-0.2));
        assert!(sink.into_mesh().is_empty());
    }

    #[test]
    fn over_bright_opacity_is_clamped() {
        let mut sink = MeshSink::new(TextureId::default(), Pos2::ZERO, egui::vec2(8.0, 8.0));
        sink.draw_sprite(&draw(3.0));
        let mesh = sink.into_mesh();
        assert_eq!(mesh.vertices[0].color.g(), 128);
    }
}
