pub const TIMESTAMP_RANGE: std::ops::Range<usize> = 0..4;
pub const SOIL_MOISTURE_OFFSET: usize = 4;
pub const SUNLIGHT_OFFSET: usize = 5;
pub const AIR_TEMPERATURE_OFFSET: usize = 6;
pub const AIR_HUMIDITY_OFFSET: usize = 7;
pub const INITIAL_STATE_OFFSET: usize = 8;
pub const TRAILER_OFFSET: usize = 9;
pub const DURATION_SIZE: usize = 2;

pub const STATE_ON: u8 = 0x01;
pub const LUX_PER_COUNT: u32 = 500;

pub const MIN_LEN: usize = TRAILER_OFFSET;
