//! Statistics helpers: descriptive measures, two-sample tests and the
//! special functions their p-values need.

mod descriptive;
mod hypothesis;
mod special;

pub use descriptive::{mean, quantile_sorted, round_to, sample_std_dev, shannon_entropy, sorted};
pub use hypothesis::{KS_EXACT_MAX, TestError, TestOutcome, chi_square_two_sample, ks_two_sample};
pub use special::{chi_square_sf, gamma_q, kolmogorov_sf, ln_gamma};
