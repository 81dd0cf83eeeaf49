use crate::hal::pixel::PixelOutput;
use crate::hal::wifi::Wifi;
use crate::svc::{Clock, Feed};

pub mod pixel;
pub mod wifi;

pub trait Platform {
    fn wifi(&self) -> &(dyn Wifi + '_);
    fn feed(&self) -> &(dyn Feed + '_);
    fn clock(&self) -> &(dyn Clock + '_);

    /// Hands over the pixel outputs, in configuration order. Later calls
    /// return an empty list.
    fn take_pixel_outputs(&mut self) -> Vec<Box<dyn PixelOutput>>;

    fn random_seed(&self) -> u64;
}
