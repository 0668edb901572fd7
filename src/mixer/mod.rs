pub mod converter;
pub mod downmix;
pub mod weights;
