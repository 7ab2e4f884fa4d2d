/// Seek bar feeding the speedometer, fixed to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderInput {
    Step(i32),
    Min,
    Max,
}

impl Slider {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 100;

    pub fn new(value: i32) -> Self {
        Self {
            value: value.clamp(Self::MIN, Self::MAX),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Moves the thumb; returns the new value only if it changed.
    pub fn apply(&mut self, input: SliderInput) -> Option<i32> {
        let target = match input {
            SliderInput::Step(delta) => self.value.saturating_add(delta),
            SliderInput::Min => Self::MIN,
            SliderInput::Max => Self::MAX,
        };
        self.set(target)
    }

    pub fn set(&mut self, value: i32) -> Option<i32> {
        let value = value.clamp(Self::MIN, Self::MAX);
        if value == self.value {
            return None;
        }
        self.value = value;
        Some(value)
    }
}
