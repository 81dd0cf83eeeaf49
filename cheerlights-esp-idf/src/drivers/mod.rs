pub mod feed;
pub mod wifi;
pub mod ws2812;
