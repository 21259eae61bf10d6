//! Layered Compositor
//!
//! The screen is split into layers (header, stage, result panel, footer,
//! alert). Each layer renders into its own buffer and the compositor stacks
//! them by z-index into the frame.
//!
//! A cell is transparent when it holds a blank symbol on the default
//! background, so a layer only covers what it actually draws.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// Owns every layer and stacks them into one output buffer
pub struct Compositor {
    layers: HashMap<LayerId, Layer>,
    /// Back to front
    render_order: Vec<LayerId>,
    next_id: u32,
    output: Buffer,
    area: Rect,
}

impl Compositor {
    /// Create a compositor covering `area`
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        self.layers.insert(id, Layer::new(id, bounds, z_index));
        self.update_render_order();

        id
    }

    /// Mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Move and resize a layer in one step
    ///
    /// The layer buffer is only reallocated when its size changes.
    pub fn place_layer(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            if layer.bounds.width != bounds.width || layer.bounds.height != bounds.height {
                layer.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
            }
            layer.bounds = bounds;
        }
    }

    /// Show or hide a layer
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Resize the whole compositor
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Stack all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, self.area, layer);
                }
            }
        }

        &self.output
    }

    fn blit_layer(output: &mut Buffer, area: Rect, layer: &Layer) {
        let lb = layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x.saturating_add(lx);
                let dst_y = lb.y.saturating_add(ly);
                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let Some(src) = layer.buffer.cell((lx, ly)) else {
                    continue;
                };
                if src.symbol() == " " && src.bg == Color::Reset {
                    continue;
                }
                if let Some(dst) = output.cell_mut((dst_x, dst_y)) {
                    *dst = src.clone();
                }
            }
        }
    }

    /// Topmost visible layer at a screen position (for mouse clicks)
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        self.render_order.iter().rev().copied().find(|id| {
            self.layers
                .get(id)
                .is_some_and(|layer| layer.visible && layer.contains(x, y))
        })
    }

    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order.sort_by_key(|id| {
            (
                self.layers.get(id).map_or(0, |l| l.z_index),
                id.0,
            )
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_higher_layer_wins() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 2));
        let back = compositor.create_layer(Rect::new(0, 0, 10, 2), 0);
        let front = compositor.create_layer(Rect::new(2, 0, 3, 1), 10);

        compositor
            .layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "aaaaaaaaaa", Style::default());
        compositor
            .layer_buffer_mut(front)
            .unwrap()
            .set_string(0, 0, "b b", Style::default());

        let out = compositor.composite();
        let row: String = (0..10).map(|x| out[(x, 0)].symbol().to_string()).collect();
        // The blank in the middle of the front layer lets the back show through
        assert_eq!(row, "aababaaaaa");
    }

    #[test]
    fn test_background_makes_blank_opaque() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 4, 1));
        let back = compositor.create_layer(Rect::new(0, 0, 4, 1), 0);
        let front = compositor.create_layer(Rect::new(0, 0, 4, 1), 5);

        compositor
            .layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "xxxx", Style::default());
        compositor
            .layer_buffer_mut(front)
            .unwrap()
            .set_style(Rect::new(0, 0, 2, 1), Style::default().bg(Color::Blue));

        let out = compositor.composite();
        assert_eq!(out[(0, 0)].symbol(), " ");
        assert_eq!(out[(2, 0)].symbol(), "x");
    }

    #[test]
    fn test_layer_at_skips_hidden() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 10));
        let stage = compositor.create_layer(Rect::new(0, 0, 10, 10), 0);
        let alert = compositor.create_layer(Rect::new(2, 2, 4, 4), 100);

        assert_eq!(compositor.layer_at(3, 3), Some(alert));
        compositor.set_visible(alert, false);
        assert_eq!(compositor.layer_at(3, 3), Some(stage));
        assert_eq!(compositor.layer_at(20, 3), None);
    }
}
