/// Gaussian kernel density estimate with Scott's rule bandwidth
/// (`n^(-1/5)` times the sample standard deviation).
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// `None` when fewer than two finite samples exist or they have no
    /// spread; there is no density to estimate then.
    pub fn new(values: &[f64]) -> Option<Self> {
        let samples: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if samples.len() < 2 {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std = variance.sqrt();
        if std <= 0.0 || !std.is_finite() {
            return None;
        }

        Some(Self {
            bandwidth: n.powf(-0.2) * std,
            samples,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn density(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.samples.len() as f64 * h * (2.0 * std::f64::consts::PI).sqrt());
        self.samples
            .iter()
            .map(|xi| {
                let z = (x - xi) / h;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            * norm
    }

    /// Sample range widened by `cut` bandwidths on each side.
    pub fn support(&self, cut: f64) -> (f64, f64) {
        let (lo, hi) = super::extent(&self.samples).unwrap_or((0.0, 0.0));
        (lo - cut * self.bandwidth, hi + cut * self.bandwidth)
    }

    /// `(x, density)` on `points` evenly spaced positions over the support.
    pub fn curve(&self, points: usize, cut: f64) -> Vec<(f64, f64)> {
        let (lo, hi) = self.support(cut);
        self.curve_between(lo, hi, points)
    }

    pub fn curve_between(&self, lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
        let points = points.max(2);
        let step = (hi - lo) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = lo + step * i as f64;
                (x, self.density(x))
            })
            .collect()
    }
}
