use crate::{BitReader, BitWrite, Serde, SerdeErr, VariableInteger};

impl Serde for String {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let length = u32::try_from(self.len()).expect("string longer than u32::MAX bytes");
        VariableInteger(length).ser(writer);
        for byte in self.as_bytes() {
            writer.write_byte(*byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = VariableInteger::de(reader)?.get() as usize;
        if length
            .checked_mul(8)
            .map_or(true, |bits| bits > reader.bits_remaining())
        {
            return Err(SerdeErr);
        }
        let mut bytes = Vec::with_capacity(length);
        for _ in 0..length {
            bytes.push(reader.read_byte()?);
        }
        String::from_utf8(bytes).map_err(|_| SerdeErr)
    }
}
