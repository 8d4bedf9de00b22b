//! Contact math and the relaxation passes
//!
//! `complete_collision` picks the smallest translation that separates box1
//! from box2. The four candidates are tried in a fixed order so ties always
//! resolve the same way:
//!
//! | side | translation of box1        | meaning                 |
//! |------|----------------------------|-------------------------|
//! | 0    | `box2.right - box1.left`   | push box1 right (>= 0)  |
//! | 1    | `box2.left - box1.right`   | push box1 left (<= 0)   |
//! | 2    | `box2.bottom - box1.top`   | push box1 down (>= 0)   |
//! | 3    | `box2.top - box1.bottom`   | push box1 up, it rests  |
//!
//! y grows downward, so side 3 means box1 is standing on box2.

use crate::core::geometry::{strictly_overlaps, Vec2};

use super::overlap::{active_passive_overlap, passive_passive_overlap, passive_wall_overlap};
use super::scratch::{ContactTarget, Hit, Scratch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    PushRight = 0,
    PushLeft = 1,
    PushDown = 2,
    PushUp = 3,
}

impl Side {
    const ALL: [Side; 4] = [Side::PushRight, Side::PushLeft, Side::PushDown, Side::PushUp];

    pub fn index(self) -> usize {
        self as usize
    }

    /// 0 = x, 1 = y
    pub fn axis(self) -> usize {
        self.index() / 2
    }
}

/// Resolved contact: the side plus the signed translation along its axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub side: Side,
    pub penetration: f32,
}

impl Contact {
    /// Translation to apply to box1 as a vector
    pub fn push(&self) -> Vec2 {
        let mut v = Vec2::zero();
        v[self.side.axis()] = self.penetration;
        v
    }
}

/// Minimal separating translation of box1 out of box2.
/// Only meaningful when the boxes overlap.
pub fn complete_collision(b1_tl: Vec2, b1_br: Vec2, b2_tl: Vec2, b2_br: Vec2) -> Contact {
    let candidates = [
        b2_br.x - b1_tl.x,
        b2_tl.x - b1_br.x,
        b2_br.y - b1_tl.y,
        b2_tl.y - b1_br.y,
    ];
    let mut best = 0;
    for k in 1..candidates.len() {
        if candidates[k].abs() < candidates[best].abs() {
            best = k;
        }
    }
    Contact { side: Side::ALL[best], penetration: candidates[best] }
}

/// Contacts of one box against every box it overlaps, in input order
pub fn resolve_one_against_many(
    tl: Vec2,
    br: Vec2,
    others_tl: &[Vec2],
    others_br: &[Vec2],
    out: &mut Vec<Contact>,
) {
    out.clear();
    for (&o_tl, &o_br) in others_tl.iter().zip(others_br) {
        if strictly_overlaps(tl, br, o_tl, o_br) {
            out.push(complete_collision(tl, br, o_tl, o_br));
        }
    }
}

/// Active boxes against passive boxes, once per tick.
/// Every overlap against a physical victim becomes a `Hit`.
pub(crate) fn resolve_active_hits(s: &mut Scratch) -> usize {
    active_passive_overlap(&s.active_tl, &s.active_br, &s.tl, &s.br, &mut s.active);
    s.hits.clear();
    let n = s.len();
    for attacker in 0..n {
        for victim in 0..n {
            if s.active.get(attacker, victim) && s.physical[victim] {
                s.hits.push(Hit { attacker, victim, amount: s.attack_damage[attacker] });
            }
        }
    }
    s.hits.len()
}

/// One pass of every physical entity against the level walls.
/// Returns the total adjustment applied.
pub(crate) fn resolve_wall_collisions(s: &mut Scratch, max_push: Option<f32>) -> f32 {
    if s.wall_tl.is_empty() {
        return 0.0;
    }
    passive_wall_overlap(&s.tl, &s.br, &s.wall_tl, &s.wall_br, &mut s.walls);

    let mut total = 0.0;
    for i in 0..s.len() {
        if !s.physical[i] {
            continue;
        }
        let mut push = Vec2::zero();
        for w in 0..s.wall_tl.len() {
            if !s.walls.get(i, w) {
                continue;
            }
            let contact = complete_collision(s.tl[i], s.br[i], s.wall_tl[w], s.wall_br[w]);
            let axis = contact.side.axis();
            // Conflicting walls on one axis: the deeper one wins
            if contact.penetration.abs() > push[axis].abs() {
                push[axis] = contact.penetration;
            }
            if contact.side == Side::PushUp {
                s.grounded[i] = true;
            }
            s.contacts.push((i, ContactTarget::Wall(w)));
        }
        if let Some(limit) = max_push {
            push.x = push.x.clamp(-limit, limit);
            push.y = push.y.clamp(-limit, limit);
        }
        if push == Vec2::zero() {
            continue;
        }
        s.translate(i, push);
        for axis in 0..2 {
            if s.velocity[i][axis] * push[axis] < 0.0 {
                s.velocity[i][axis] = 0.0;
            }
        }
        total += push.manhattan();
    }
    total
}

/// One pass of physical entity pairs (i < j) against each other.
/// Returns the total adjustment applied.
pub(crate) fn resolve_passive_passive_collisions(s: &mut Scratch) -> f32 {
    passive_passive_overlap(&s.tl, &s.br, &mut s.passive);
    s.swaps.clear();

    let n = s.len();
    let mut total = 0.0;
    for i in 0..n {
        if !s.physical[i] {
            continue;
        }
        for j in (i + 1)..n {
            if !s.physical[j] || !s.passive.get(i, j) {
                continue;
            }
            // Earlier pairs in this pass may already have moved them apart
            if !strictly_overlaps(s.tl[i], s.br[i], s.tl[j], s.br[j]) {
                continue;
            }
            s.contacts.push((i, ContactTarget::Entity(j)));
            s.contacts.push((j, ContactTarget::Entity(i)));

            let contact = complete_collision(s.tl[i], s.br[i], s.tl[j], s.br[j]);
            let axis = contact.side.axis();
            let relative = s.velocity[i][axis] - s.velocity[j][axis];
            if relative * contact.penetration > 0.0 {
                continue;
            }

            let half = contact.push() * 0.5;
            s.translate(i, half);
            s.translate(j, half * -1.0);
            total += contact.penetration.abs();

            match contact.side {
                Side::PushUp => s.grounded[i] = true,
                Side::PushDown => s.grounded[j] = true,
                _ => {}
            }
            if relative != 0.0 {
                s.swaps.push((i, j, axis));
            }
        }
    }

    for k in 0..s.swaps.len() {
        let (i, j, axis) = s.swaps[k];
        let vi = s.velocity[i][axis];
        s.velocity[i][axis] = s.velocity[j][axis];
        s.velocity[j][axis] = vi;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;

    fn corners(r: Rect) -> (Vec2, Vec2) {
        (r.top_left(), r.bottom_right())
    }

    fn collide(a: Rect, b: Rect) -> Contact {
        let (a_tl, a_br) = corners(a);
        let (b_tl, b_br) = corners(b);
        complete_collision(a_tl, a_br, b_tl, b_br)
    }

    #[test]
    fn resting_on_floor_pushes_up() {
        let c = collide(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(-100.0, 9.0, 200.0, 5.0));
        assert_eq!(c.side, Side::PushUp);
        assert_eq!(c.penetration, -1.0);
        assert_eq!(c.side.axis(), 1);
    }

    #[test]
    fn side_overlap_pushes_left() {
        let c = collide(Rect::new(0.0, 0.0, 32.0, 32.0), Rect::new(28.0, 0.0, 32.0, 32.0));
        assert_eq!(c.side, Side::PushLeft);
        assert_eq!(c.penetration, -4.0);
    }

    #[test]
    fn head_under_ceiling_pushes_down() {
        let c = collide(Rect::new(0.0, 10.0, 10.0, 10.0), Rect::new(-50.0, 0.0, 100.0, 12.0));
        assert_eq!(c.side, Side::PushDown);
        assert_eq!(c.penetration, 2.0);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        // Identical boxes: every candidate has magnitude 10
        let c = collide(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(c.side, Side::PushRight);
        assert_eq!(c.penetration, 10.0);

        // x and y tie at 2: x wins
        let c = collide(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(8.0, 8.0, 10.0, 10.0));
        assert_eq!(c.side, Side::PushLeft);
    }

    #[test]
    fn one_against_many_skips_non_overlapping() {
        let (tl, br) = corners(Rect::new(0.0, 0.0, 10.0, 10.0));
        let others = [
            Rect::new(9.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 10.0, 10.0), // touching only
            Rect::new(0.0, 8.0, 10.0, 10.0),
        ];
        let o_tl: Vec<_> = others.iter().map(|r| r.top_left()).collect();
        let o_br: Vec<_> = others.iter().map(|r| r.bottom_right()).collect();
        let mut out = Vec::new();
        resolve_one_against_many(tl, br, &o_tl, &o_br, &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].side, Side::PushLeft);
        assert_eq!(out[1].side, Side::PushUp);
    }
}
