//! Shared mathematical utilities for score vectors.

/// Logistic sigmoid: 1 / (1 + e^-x).
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Dot product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Normalize a vector to unit L2 length. Returns zero vector if input has zero norm.
pub fn vector_normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        vec![0.0; v.len()]
    } else {
        v.iter().map(|x| x / norm).collect()
    }
}

/// Temperature-scaled softmax over raw margins.
///
/// Scores are shifted by their maximum before exponentiation so large margins
/// stay finite. Non-positive temperatures fall back to 1.0.
pub fn softmax(scores: &[f32], temperature: f32) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }
    let t = if temperature > 0.0 { temperature } else { 1.0 };
    let max = scores.iter().fold(f32::NEG_INFINITY, |m, &s| m.max(s));
    let exps: Vec<f32> = scores.iter().map(|&s| ((s - max) / t).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

/// Min-max normalize values into [0, 1].
///
/// The epsilon in the divisor keeps an all-equal input finite: it maps to all
/// zeros instead of dividing by zero.
pub fn min_max_normalize(values: &[f32]) -> Vec<f32> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().fold(f32::INFINITY, |m, &v| m.min(v));
    let max = values.iter().fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    let range = max - min + 1e-9;
    values.iter().map(|&v| (v - min) / range).collect()
}

/// Affine remap of unit-interval values into [lo, hi].
pub fn remap_unit(values: &[f32], lo: f32, hi: f32) -> Vec<f32> {
    values.iter().map(|&v| lo + v * (hi - lo)).collect()
}

/// Arithmetic mean. Empty input yields 0.0.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}

/// Round to three decimal places.
pub fn round3(x: f32) -> f32 {
    (x * 1000.0).round() / 1000.0
}
