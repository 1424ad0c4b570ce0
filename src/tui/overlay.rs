// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Step-card placement math, kept free of widget code so it can be tested directly.

use ratatui::layout::Rect;

use crate::dom::Bounds;
use crate::model::PreferredSide;

const ANCHOR_GAP: u16 = 1;
const DETACHED_RIGHT_MARGIN: u16 = 2;

/// What the card is positioned relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CardAnchor {
    /// Anchored next to a resolved target element.
    Element(Bounds),
    /// Informational step or completion card: dead center.
    Centered,
    /// Target missing: parked at the right edge so it never covers the page content
    /// the user is presumably looking for.
    Detached,
}

/// Places a `width` x `height` card inside `viewport`.
///
/// The preferred side is honored where possible; the result is always clamped fully
/// into the viewport, so a card near an edge slides along it rather than clipping.
pub(crate) fn place_card(
    viewport: Rect,
    anchor: CardAnchor,
    side: PreferredSide,
    width: u16,
    height: u16,
) -> Rect {
    let width = width.min(viewport.width);
    let height = height.min(viewport.height);

    let (ideal_x, ideal_y) = match anchor {
        CardAnchor::Centered => (
            centered(viewport.x, viewport.width, width),
            centered(viewport.y, viewport.height, height),
        ),
        CardAnchor::Detached => (
            i64::from(viewport.right()) - i64::from(width) - i64::from(DETACHED_RIGHT_MARGIN),
            centered(viewport.y, viewport.height, height),
        ),
        CardAnchor::Element(bounds) => {
            let gap = i64::from(ANCHOR_GAP);
            let center_x = bounds.center_x() as i64 - i64::from(width) / 2;
            let center_y = bounds.center_y() as i64 - i64::from(height) / 2;
            match side {
                PreferredSide::Top => (center_x, bounds.top as i64 - i64::from(height) - gap),
                PreferredSide::Bottom => (center_x, bounds.bottom() as i64 + gap),
                PreferredSide::Left => (bounds.left as i64 - i64::from(width) - gap, center_y),
                PreferredSide::Right => (bounds.right() as i64 + gap, center_y),
                PreferredSide::Center => (center_x, center_y),
            }
        }
    };

    let max_x = i64::from(viewport.right().saturating_sub(width));
    let max_y = i64::from(viewport.bottom().saturating_sub(height));
    let x = ideal_x.clamp(i64::from(viewport.x), max_x.max(i64::from(viewport.x)));
    let y = ideal_y.clamp(i64::from(viewport.y), max_y.max(i64::from(viewport.y)));

    Rect { x: x as u16, y: y as u16, width, height }
}

fn centered(origin: u16, span: u16, size: u16) -> i64 {
    i64::from(origin) + (i64::from(span) - i64::from(size)) / 2
}

/// Converts element geometry into a drawable rect, dropped when fully off-screen.
pub(crate) fn highlight_rect(viewport: Rect, bounds: Bounds) -> Option<Rect> {
    let left = (bounds.left.max(0.0) as u16).max(viewport.x);
    let top = (bounds.top.max(0.0) as u16).max(viewport.y);
    let right = ((bounds.right().max(0.0)) as u16).min(viewport.right());
    let bottom = ((bounds.bottom().max(0.0)) as u16).min(viewport.bottom());
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect { x: left, y: top, width: right - left, height: bottom - top })
}

#[cfg(test)]
mod tests {
    use super::{highlight_rect, place_card, CardAnchor};
    use crate::dom::Bounds;
    use crate::model::PreferredSide;
    use ratatui::layout::Rect;

    fn viewport() -> Rect {
        Rect { x: 0, y: 0, width: 100, height: 40 }
    }

    fn anchor() -> CardAnchor {
        // 20 wide, 4 tall box in the middle of the viewport.
        CardAnchor::Element(Bounds::new(18.0, 40.0, 20.0, 4.0))
    }

    #[test]
    fn bottom_placement_sits_under_the_anchor() {
        let card = place_card(viewport(), anchor(), PreferredSide::Bottom, 30, 8);
        assert_eq!(card.y, 23); // anchor bottom (22) + gap
        assert_eq!(card.x, 35); // centered on anchor center_x (50)
    }

    #[test]
    fn top_placement_sits_above_the_anchor() {
        let card = place_card(viewport(), anchor(), PreferredSide::Top, 30, 8);
        assert_eq!(card.y, 9); // anchor top (18) - height (8) - gap
    }

    #[test]
    fn side_placements_flank_the_anchor() {
        let left = place_card(viewport(), anchor(), PreferredSide::Left, 24, 6);
        assert_eq!(left.x, 15); // anchor left (40) - width (24) - gap

        let right = place_card(viewport(), anchor(), PreferredSide::Right, 24, 6);
        assert_eq!(right.x, 61); // anchor right (60) + gap
    }

    #[test]
    fn placement_is_clamped_into_the_viewport() {
        // Anchor hugging the top-left corner; a top/left card would go negative.
        let corner = CardAnchor::Element(Bounds::new(0.0, 0.0, 10.0, 3.0));
        let top = place_card(viewport(), corner, PreferredSide::Top, 30, 8);
        assert_eq!((top.x, top.y), (0, 0));

        let left = place_card(viewport(), corner, PreferredSide::Left, 30, 8);
        assert_eq!((left.x, left.y), (0, 0));

        // Anchor at the far edge pushes a bottom card back inside.
        let edge = CardAnchor::Element(Bounds::new(38.0, 90.0, 10.0, 2.0));
        let card = place_card(viewport(), edge, PreferredSide::Bottom, 30, 8);
        assert!(card.x + card.width <= 100);
        assert!(card.y + card.height <= 40);
    }

    #[test]
    fn centered_and_detached_anchors() {
        let center = place_card(viewport(), CardAnchor::Centered, PreferredSide::Center, 40, 10);
        assert_eq!((center.x, center.y), (30, 15));

        let detached = place_card(viewport(), CardAnchor::Detached, PreferredSide::Bottom, 30, 8);
        assert_eq!(detached.x, 68); // right edge - width - margin
        assert_eq!(detached.y, 16);
    }

    #[test]
    fn oversized_cards_shrink_to_the_viewport() {
        let card = place_card(viewport(), CardAnchor::Centered, PreferredSide::Center, 200, 90);
        assert_eq!((card.width, card.height), (100, 40));
        assert_eq!((card.x, card.y), (0, 0));
    }

    #[test]
    fn highlight_rect_clips_and_drops_offscreen_geometry() {
        let clipped = highlight_rect(viewport(), Bounds::new(38.0, 95.0, 20.0, 6.0)).unwrap();
        assert_eq!(clipped.x, 95);
        assert_eq!(clipped.width, 5);
        assert_eq!(clipped.height, 2);

        assert!(highlight_rect(viewport(), Bounds::new(50.0, 120.0, 10.0, 3.0)).is_none());
    }
}
