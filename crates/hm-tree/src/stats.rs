fn plogp(p: f64) -> f64 {
    if p > 0.0 {
        p * p.log2()
    } else {
        0.0
    }
}

/// Shannon entropy in bits of the distribution proportional to `weights`.
///
/// Zero for an empty or all-zero input.
pub fn entropy(weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    -weights.iter().map(|w| plogp(w / total)).sum::<f64>()
}

/// `2^entropy`: the effective number of outcomes.
pub fn perplexity(weights: &[f64]) -> f64 {
    entropy(weights).exp2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_distributions() {
        assert_eq!(entropy(&[1.0, 1.0]), 1.0);
        assert_eq!(entropy(&[3.0]), 0.0);
        assert_eq!(entropy(&[]), 0.0);
        assert!((perplexity(&[2.0, 2.0, 2.0, 2.0]) - 4.0).abs() < 1e-12);
        assert!(perplexity(&[9.0, 1.0]) < 2.0);
    }
}
