//! Binary assets uploaded to the watch.

use bytes::Bytes;

/// A named blob. Unless named explicitly, the name is the lowercase hex of
/// the big-endian CRC-32 of the data, so equal data gets equal names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    file_name: String,
    file_data: Bytes,
}

impl AssetFile {
    pub fn new(data: impl Into<Bytes>) -> Self {
        let file_data = data.into();
        Self {
            file_name: crc_name(&file_data),
            file_data,
        }
    }

    pub fn named(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: name.into(),
            file_data: data.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_data(&self) -> &Bytes {
        &self.file_data
    }

    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.file_name = name.into();
    }

    pub fn len(&self) -> usize {
        self.file_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_data.is_empty()
    }
}

/// Encode data as an asset named by its CRC.
pub fn encode_asset_file(data: &[u8]) -> AssetFile {
    AssetFile::new(Bytes::copy_from_slice(data))
}

fn crc_name(data: &[u8]) -> String {
    hex::encode(crc32fast::hash(data).to_be_bytes())
}
