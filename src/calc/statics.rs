// Statics calculators
//
// Support reactions of a simply supported beam, normal/tangential
// components of a force on a circular surface, and the centroid of a right
// trapezoid. Each validates its domain and reports `OutOfDomain` with the
// reason instead of producing NaN.

use crate::error::{AssistError, Result};
use serde::Serialize;

/// Default support distances (mm) when the user leaves them blank
pub const DEFAULT_SUPPORT_DISTANCE: f64 = 24.0;

fn ensure_finite(values: &[(&str, f64)]) -> Result<()> {
    for (name, value) in values {
        if !value.is_finite() {
            return Err(AssistError::OutOfDomain(format!("{} must be a finite number", name)));
        }
    }
    Ok(())
}

/// Reactions at supports A and B
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reactions {
    pub ra: f64,
    pub rb: f64,
}

/// Reactions for a point load `w` at distance `a` from A and `b` from B
///
/// `RA = W·b/(a+b)`, `RB = W·a/(a+b)`; the support nearer the load carries more.
pub fn reactions(w: f64, a: f64, b: f64) -> Result<Reactions> {
    ensure_finite(&[("W", w), ("a", a), ("b", b)])?;

    if w <= 0.0 {
        return Err(AssistError::OutOfDomain("load W must be positive".to_string()));
    }
    if a < 0.0 || b < 0.0 {
        return Err(AssistError::OutOfDomain("distances a and b cannot be negative".to_string()));
    }
    let span = a + b;
    if span <= 0.0 {
        return Err(AssistError::OutOfDomain("a + b must be greater than zero".to_string()));
    }

    Ok(Reactions {
        ra: w * b / span,
        rb: w * a / span,
    })
}

/// Components of a vertical force acting at horizontal position `x` on a circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Components {
    pub normal: f64,
    pub tangential: f64,
    pub sin_theta: f64,
    pub cos_theta: f64,
}

/// `Fn = F·x/r`, `Ft = F·√(r²−x²)/r`
pub fn force_components(f: f64, r: f64, x: f64) -> Result<Components> {
    ensure_finite(&[("F", f), ("r", r), ("x", x)])?;

    if r <= 0.0 {
        return Err(AssistError::OutOfDomain("radius must be positive".to_string()));
    }
    if x.abs() > r {
        return Err(AssistError::OutOfDomain("x must be within [-r, r]".to_string()));
    }

    let sin_theta = x / r;
    let cos_theta = (r * r - x * x).max(0.0).sqrt() / r;

    Ok(Components {
        normal: f * sin_theta,
        tangential: f * cos_theta,
        sin_theta,
        cos_theta,
    })
}

/// Centroid measured from the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub area: f64,
}

/// Centroid of a right trapezoid (vertical left edge, top `a`, bottom `b`,
/// height `h`) by the composite method: a rectangle of the shorter base plus
/// the right triangle that makes up the difference.
pub fn trapezoid_centroid(a: f64, b: f64, h: f64) -> Result<Centroid> {
    ensure_finite(&[("a", a), ("b", b), ("h", h)])?;

    if a <= 0.0 || b <= 0.0 || h <= 0.0 {
        return Err(AssistError::OutOfDomain(
            "top base, bottom base and height must all be positive".to_string(),
        ));
    }

    let width = a.min(b);
    let t = (a - b).abs();

    let rect_area = width * h;
    let (rect_x, rect_y) = (width / 2.0, h / 2.0);

    let tri_area = 0.5 * t * h;
    let tri_x = width + t / 3.0;
    // Wider top: triangle hangs off the top edge
    let tri_y = if a > b { 2.0 * h / 3.0 } else { h / 3.0 };

    let area = rect_area + tri_area;

    Ok(Centroid {
        x: (rect_area * rect_x + tri_area * tri_x) / area,
        y: (rect_area * rect_y + tri_area * tri_y) / area,
        area,
    })
}
