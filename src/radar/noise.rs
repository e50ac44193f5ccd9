use rand::Rng;
use rand_distr::Exp1;

// Receiver noise power per range bin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseModel {
    // Exponentially distributed power, i.e. a Rayleigh distributed amplitude
    Exponential,
    // Every bin receives exactly the mean power
    Mean,
}

impl NoiseModel {
    pub fn from_use_pdf(use_pdf: bool) -> NoiseModel {
        if use_pdf {
            NoiseModel::Exponential
        } else {
            NoiseModel::Mean
        }
    }

    /// Draws a noise power in W with mean `avg_noise`.
    pub fn power<R: Rng>(&self, avg_noise: f64, rng: &mut R) -> f64 {
        match self {
            NoiseModel::Exponential => {
                let x: f64 = rng.sample(Exp1);
                avg_noise * x
            }
            NoiseModel::Mean => avg_noise,
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::NoiseModel;

    #[test]
    fn mean_model_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(NoiseModel::Mean.power(3e-14, &mut rng), 3e-14);
        }
    }

    #[test]
    fn exponential_model_statistics() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 100_000;
        let samples: Vec<f64> = (0..n)
            .map(|_| NoiseModel::Exponential.power(2., &mut rng))
            .collect();
        assert!(samples.iter().all(|&x| x >= 0.));
        let mean = samples.iter().sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 2., max_relative = 0.02);
        // P(X > mean) = 1/e
        let above = samples.iter().filter(|&&x| x > 2.).count() as f64 / n as f64;
        assert_relative_eq!(above, (-1f64).exp(), epsilon = 0.01);
    }

    #[test]
    fn selected_by_use_pdf() {
        assert_eq!(NoiseModel::from_use_pdf(true), NoiseModel::Exponential);
        assert_eq!(NoiseModel::from_use_pdf(false), NoiseModel::Mean);
    }
}
