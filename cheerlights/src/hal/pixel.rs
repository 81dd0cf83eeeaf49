#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Moves every channel one unit toward `target`. Channels already equal
    /// to the target stay where they are.
    pub fn step_toward(self, target: Rgb) -> Rgb {
        Rgb {
            r: step_channel(self.r, target.r),
            g: step_channel(self.g, target.g),
            b: step_channel(self.b, target.b),
        }
    }
}

fn step_channel(current: u8, target: u8) -> u8 {
    use std::cmp::Ordering::*;

    match current.cmp(&target) {
        Less => current + 1,
        Greater => current - 1,
        Equal => current,
    }
}

impl From<u32> for Rgb {
    fn from(x: u32) -> Self {
        Rgb {
            r: ((x & 0xFF0000) >> 16) as u8,
            g: ((x & 0x00FF00) >> 8) as u8,
            b: (x & 0x0000FF) as u8,
        }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb { r, g, b }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One physical strip of addressable pixels.
///
/// Callers always stage a colour with `fill` and then push it with `flush`.
pub trait PixelOutput {
    fn fill(&mut self, color: Rgb);

    fn flush(&mut self) -> anyhow::Result<()>;
}
