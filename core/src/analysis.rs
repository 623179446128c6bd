use crate::*;

/// Region size reached by picking each palette color next, `None` for the current color.
pub fn lookahead_sizes(engine: &FloodEngine) -> [Option<CellCount>; Color::COUNT] {
    let mut sizes = [None; Color::COUNT];
    if engine.is_finished() {
        return sizes;
    }

    for color in Color::PALETTE {
        if color != engine.region_color() {
            let (next, _) = engine.with_choice(color);
            sizes[color.index()] = Some(next.region_size());
        }
    }
    sizes
}

/// One-step greedy hint: the color that grows the region the most, ties going to palette order.
pub fn greedy_choice(engine: &FloodEngine) -> Option<Color> {
    let mut best: Option<(Color, CellCount)> = None;
    for (color, size) in Color::PALETTE.into_iter().zip(lookahead_sizes(engine)) {
        let Some(size) = size else {
            continue;
        };
        if best.is_none_or(|(_, best_size)| size > best_size) {
            best = Some((color, size));
        }
    }
    best.map(|(color, _)| color)
}
