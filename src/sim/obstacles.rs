//! Static obstacle field: arena borders plus interior blocks
//!
//! Built once when a session starts and never mutated afterwards.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::placement::{PlacementRequest, find_free_position};
use super::rect::Rect;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// One of the four arena edge strips
    Border,
    /// Interior block
    Block,
}

/// A static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// Every obstacle of one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Field holding only the four border strips
    pub fn borders(width: f32, height: f32, thickness: f32) -> Self {
        let strips = [
            Rect::new(0.0, 0.0, width, thickness),
            Rect::new(0.0, height - thickness, width, thickness),
            Rect::new(0.0, 0.0, thickness, height),
            Rect::new(width - thickness, 0.0, thickness, height),
        ];
        Self {
            obstacles: strips
                .into_iter()
                .map(|rect| Obstacle {
                    kind: ObstacleKind::Border,
                    rect,
                })
                .collect(),
        }
    }

    /// Borders plus a density-scaled number of interior blocks.
    ///
    /// Blocks keep `block_clearance` from each other, from the borders and
    /// from every `reserved` rectangle. A block the sampler cannot fit is
    /// skipped.
    pub fn generate<R: Rng>(
        rng: &mut R,
        width: f32,
        height: f32,
        tuning: &Tuning,
        reserved: &[Rect],
    ) -> Self {
        let mut field = Self::borders(width, height, tuning.border_thickness);

        let wanted = ((width * height) / tuning.area_per_block).floor() as usize;
        let request = PlacementRequest::new(
            Rect::new(0.0, 0.0, width, height),
            Vec2::splat(tuning.block_size),
            tuning.max_placement_attempts,
        )
        .with_clearance(tuning.block_clearance)
        .with_inset(tuning.block_clearance / 2.0);

        let mut skipped = 0;
        for _ in 0..wanted {
            let mut occupied = field.rects();
            occupied.extend_from_slice(reserved);
            match find_free_position(rng, &request, &occupied) {
                Ok(pos) => field.add_block(Rect::square(pos, tuning.block_size)),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!(
                "Placed {} of {} blocks ({} skipped, arena {}x{})",
                wanted - skipped,
                wanted,
                skipped,
                width,
                height
            );
        }
        field
    }

    /// Append an interior block as-is
    pub fn add_block(&mut self, rect: Rect) {
        self.obstacles.push(Obstacle {
            kind: ObstacleKind::Block,
            rect,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Block)
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.obstacles.iter().map(|o| o.rect).collect()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// True if `rect` overlaps any obstacle
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.rect.intersects(rect))
    }
}
