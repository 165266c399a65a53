use crate::Mat;
use rand::Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;

/// Sample d,n matrix from U(0,1)
pub fn runif(dd: usize, nn: usize) -> Mat {
    let rvec = (0..(dd * nn))
        .into_par_iter()
        .map_init(rand::rng, |rng, _| rng.random::<f32>())
        .collect();

    Mat::from_vec(dd, nn, rvec)
}

/// Sample d,n matrix from N(0,1)
pub fn rnorm(dd: usize, nn: usize) -> Mat {
    let rvec = (0..(dd * nn))
        .into_par_iter()
        .map_init(rand::rng, |rng, _| rng.sample::<f32, _>(StandardNormal))
        .collect();

    Mat::from_vec(dd, nn, rvec)
}
