pub mod analysis;
pub mod buffer;
pub mod decode;
pub mod dsp;
pub mod features;
pub mod resample;
