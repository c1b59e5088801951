//! Piecewise response curves over body composition
//!
//! Every curve is continuous at its segment boundaries.

/// Muscle fraction of an average adult
pub const BASELINE_MUSCLE: f32 = 0.30;
/// Fat fraction of an average adult
pub const BASELINE_FAT: f32 = 0.15;
/// Reference adult weight (kg) for size scaling
pub const REFERENCE_WEIGHT: f32 = 70.0;
/// Share of weight that is skeleton and organs in a typical build
pub const STRUCTURAL_FRACTION: f32 = 0.55;

/// Strength gained from muscle fraction, with diminishing returns
pub fn muscle_curve(muscle: f32) -> f32 {
    if muscle < 0.20 {
        2.0 * muscle
    } else if muscle < 0.35 {
        0.40 + (muscle - 0.20)
    } else {
        0.55 + 0.5 * (muscle - 0.35)
    }
}

/// Strength lost when fat stores are nearly gone
pub fn lean_penalty(fat: f32) -> f32 {
    if fat < 0.05 {
        (0.05 - fat) * 4.0
    } else {
        0.0
    }
}

/// Speed lost to fat, mild until the baseline and steep beyond it
pub fn fat_speed_penalty(fat: f32) -> f32 {
    if fat < 0.10 {
        0.1 * fat
    } else if fat <= BASELINE_FAT {
        0.01 + 0.5 * (fat - 0.10)
    } else {
        0.035 + 2.0 * (fat - BASELINE_FAT)
    }
}

/// Insulation from fat, flattening out at high fat fractions
pub fn insulation(fat: f32) -> f32 {
    if fat < 0.10 {
        1.5 * fat
    } else if fat < 0.25 {
        0.15 + 0.8 * (fat - 0.10)
    } else {
        0.27 + 0.3 * (fat - 0.25)
    }
}

/// Penalty for carrying more mass than the frame is built for
///
/// Zero at the structural baseline, positive when heavier.
pub fn weight_penalty(weight: f32, base_mass: f32) -> f32 {
    let ratio = if base_mass > 0.0 {
        weight / (base_mass / STRUCTURAL_FRACTION)
    } else {
        1.0
    };
    ratio.max(0.0).powf(0.7) - 1.0
}

/// Larger animals are slightly slower per unit of capacity
pub fn size_modifier(weight: f32) -> f32 {
    if weight > 0.0 {
        1.0 - 0.03 * (weight / REFERENCE_WEIGHT).log2()
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn continuous_at(f: fn(f32) -> f32, x: f32) -> bool {
        (f(x - 1e-4) - f(x)).abs() < 1e-3 && (f(x + 1e-4) - f(x)).abs() < 1e-3
    }

    #[test]
    fn test_muscle_curve_continuous() {
        assert!(continuous_at(muscle_curve, 0.20));
        assert!(continuous_at(muscle_curve, 0.35));
        assert!((muscle_curve(0.20) - 0.40).abs() < EPS);
        assert!((muscle_curve(0.35) - 0.55).abs() < EPS);
    }

    #[test]
    fn test_fat_penalty_continuous() {
        assert!(continuous_at(fat_speed_penalty, 0.10));
        assert!(continuous_at(fat_speed_penalty, 0.15));
        assert!((fat_speed_penalty(0.15) - 0.035).abs() < EPS);
    }

    #[test]
    fn test_insulation_continuous() {
        assert!(continuous_at(insulation, 0.10));
        assert!(continuous_at(insulation, 0.25));
        assert!((insulation(0.25) - 0.27).abs() < EPS);
    }

    #[test]
    fn test_lean_penalty_only_below_five_percent() {
        assert_eq!(lean_penalty(0.05), 0.0);
        assert_eq!(lean_penalty(0.20), 0.0);
        assert!((lean_penalty(0.0) - 0.2).abs() < EPS);
        assert!(continuous_at(lean_penalty, 0.05));
    }

    #[test]
    fn test_weight_penalty_zero_at_structural_baseline() {
        // 38.5 kg frame carries 70 kg at the baseline
        assert!(weight_penalty(70.0, 38.5).abs() < EPS);
        assert!(weight_penalty(90.0, 38.5) > 0.0);
        assert!(weight_penalty(50.0, 38.5) < 0.0);
        assert_eq!(weight_penalty(70.0, 0.0), 0.0);
    }

    #[test]
    fn test_size_modifier() {
        assert!((size_modifier(70.0) - 1.0).abs() < EPS);
        assert!((size_modifier(140.0) - 0.97).abs() < EPS);
        assert_eq!(size_modifier(0.0), 1.0);
    }
}
