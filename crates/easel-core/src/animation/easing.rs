//! Easing curves mapping animation progress in `[0, 1]` to `[0, 1]`

use serde::{Deserialize, Serialize};

const BOUNCE_N: f32 = 7.5625;
const BOUNCE_D: f32 = 2.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    CubicIn,
    CubicOut,
    CubicInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl Easing {
    /// Eased progress. Inputs outside `[0, 1]` are clamped, and both ends
    /// map exactly onto themselves.
    pub fn apply(self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => x,
            Easing::CubicIn => cubic_in(x),
            Easing::CubicOut => cubic_out(x),
            Easing::CubicInOut => in_out(x, cubic_in, cubic_out),
            Easing::BounceIn => bounce_in(x),
            Easing::BounceOut => bounce_out(x),
            Easing::BounceInOut => in_out(x, bounce_in, bounce_out),
        }
    }
}

fn cubic_in(x: f32) -> f32 {
    x * x * x
}

fn cubic_out(x: f32) -> f32 {
    let inv = 1.0 - x;
    1.0 - inv * inv * inv
}

fn bounce_out(x: f32) -> f32 {
    if x < 1.0 / BOUNCE_D {
        BOUNCE_N * x * x
    } else if x < 2.0 / BOUNCE_D {
        let x = x - 1.5 / BOUNCE_D;
        BOUNCE_N * x * x + 0.75
    } else if x < 2.5 / BOUNCE_D {
        let x = x - 2.25 / BOUNCE_D;
        BOUNCE_N * x * x + 0.9375
    } else {
        let x = x - 2.625 / BOUNCE_D;
        BOUNCE_N * x * x + 0.984375
    }
}

fn bounce_in(x: f32) -> f32 {
    1.0 - bounce_out(1.0 - x)
}

/// First half runs `ease_in` compressed, second half `ease_out`.
fn in_out(x: f32, ease_in: fn(f32) -> f32, ease_out: fn(f32) -> f32) -> f32 {
    if x < 0.5 {
        ease_in(x * 2.0) / 2.0
    } else {
        0.5 + ease_out(x * 2.0 - 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
    ];

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
            assert!(close(easing.apply(0.999_99), 1.0), "{easing:?} near 1");
        }
    }

    #[test]
    fn test_cubic_shapes() {
        assert!(close(Easing::CubicIn.apply(0.5), 0.125));
        assert!(close(Easing::CubicOut.apply(0.5), 0.875));
        assert!(close(Easing::CubicInOut.apply(0.5), 0.5));
        assert!(close(Easing::CubicInOut.apply(0.25), 0.0625));
    }

    #[test]
    fn test_bounce_segments() {
        assert!(close(Easing::BounceOut.apply(1.0 / BOUNCE_D), 0.75));
        assert!(close(Easing::BounceOut.apply(0.2), BOUNCE_N * 0.04));
        assert!(close(Easing::BounceIn.apply(0.5), 1.0 - Easing::BounceOut.apply(0.5)));
    }
}
