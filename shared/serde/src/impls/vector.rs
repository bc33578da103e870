use crate::{BitReader, BitWrite, Serde, SerdeErr, VariableInteger};

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let length = u32::try_from(self.len()).expect("vector longer than u32::MAX elements");
        VariableInteger(length).ser(writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = VariableInteger::de(reader)?.get() as usize;
        // every element costs at least one bit, so a larger count is garbage
        if length > reader.bits_remaining() {
            return Err(SerdeErr);
        }
        let mut output = Vec::with_capacity(length);
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }
}
