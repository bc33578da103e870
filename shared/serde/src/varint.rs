use crate::{BitReader, BitWrite, Serde, SerdeErr};

const GROUP_BITS: u32 = 7;
const MAX_GROUPS: u32 = 5;

/// A `u32` written in 7-bit groups, each preceded by a continuation bit.
/// Small lengths and counts cost 8 bits instead of 32.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableInteger(pub u32);

impl VariableInteger {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Serde for VariableInteger {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.0;
        loop {
            let group = value & 0x7F;
            value >>= GROUP_BITS;
            writer.write_bit(value != 0);
            for index in 0..GROUP_BITS {
                writer.write_bit(group & (1 << index) != 0);
            }
            if value == 0 {
                break;
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut output: u64 = 0;
        for group_index in 0..MAX_GROUPS {
            let proceed = reader.read_bit()?;
            let mut group: u64 = 0;
            for index in 0..GROUP_BITS {
                if reader.read_bit()? {
                    group |= 1 << index;
                }
            }
            output |= group << (group_index * GROUP_BITS);
            if !proceed {
                return u32::try_from(output)
                    .map(VariableInteger)
                    .map_err(|_| SerdeErr);
            }
        }
        Err(SerdeErr)
    }
}
