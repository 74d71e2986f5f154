use super::error::DecodeError;

pub struct TelemetryReader<'a> {
    payload: &'a [u8],
}

impl<'a> TelemetryReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.payload.len() < needed {
            return Err(DecodeError::TruncatedHeader {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(DecodeError::TruncatedHeader {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_i8(&self, offset: usize) -> Result<i8, DecodeError> {
        self.read_u8(offset).map(|byte| byte as i8)
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, DecodeError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(DecodeError::TruncatedHeader {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i32_le(&self, range: std::ops::Range<usize>) -> Result<i32, DecodeError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 4 {
            return Err(DecodeError::TruncatedHeader {
                needed: 4,
                actual: bytes.len(),
            });
        }
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.payload
            .get(range.clone())
            .ok_or(DecodeError::TruncatedHeader {
                needed: range.end,
                actual: self.payload.len(),
            })
    }
}
