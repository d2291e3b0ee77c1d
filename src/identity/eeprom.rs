use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read, Result, Seek, SeekFrom};
use std::path::PathBuf;

/// The two logical EEPROMs fitted on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EepromDevice {
    /// `eeprom0`: protocol, revision, test timestamp.
    A,
    /// `eeprom1`: UUID and MAC address.
    B,
}

impl fmt::Display for EepromDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EepromDevice::A => write!(f, "eeprom0"),
            EepromDevice::B => write!(f, "eeprom1"),
        }
    }
}

/// Raw access to the EEPROM devices.
///
/// A read is a single transfer: implementations return how many bytes landed
/// in `buffer` and callers treat anything short of `buffer.len()` as failure.
pub trait EepromReader {
    fn read(&self, device: EepromDevice, offset: u64, buffer: &mut [u8]) -> Result<usize>;
}

impl<T: EepromReader + ?Sized> EepromReader for &T {
    fn read(&self, device: EepromDevice, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        (**self).read(device, offset, buffer)
    }
}

/// EEPROMs exposed as device files (e.g. `/dev/eeprom0`, or the `eeprom`
/// attribute of an at24 device in sysfs).
#[derive(Debug, Clone)]
pub struct FileEeprom {
    device_a: PathBuf,
    device_b: PathBuf,
}

impl FileEeprom {
    pub fn new(device_a: impl Into<PathBuf>, device_b: impl Into<PathBuf>) -> Self {
        FileEeprom {
            device_a: device_a.into(),
            device_b: device_b.into(),
        }
    }

    fn path(&self, device: EepromDevice) -> &PathBuf {
        match device {
            EepromDevice::A => &self.device_a,
            EepromDevice::B => &self.device_b,
        }
    }
}

impl EepromReader for FileEeprom {
    fn read(&self, device: EepromDevice, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        let mut file = File::open(self.path(device))?;
        file.seek(SeekFrom::Start(offset))?;
        loop {
            match file.read(buffer) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

/// EEPROM contents held in memory, one image per device.
#[derive(Debug, Clone, Default)]
pub struct MemoryEeprom {
    images: HashMap<EepromDevice, Vec<u8>>,
}

impl MemoryEeprom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole image of `device`.
    pub fn with_image(mut self, device: EepromDevice, image: Vec<u8>) -> Self {
        self.images.insert(device, image);
        self
    }

    /// Write `data` at `offset`, growing the image with 0xFF (erased) bytes.
    pub fn program(&mut self, device: EepromDevice, offset: usize, data: &[u8]) {
        let image = self.images.entry(device).or_default();
        let end = offset + data.len();
        if image.len() < end {
            image.resize(end, 0xFF);
        }
        image[offset..end].copy_from_slice(data);
    }
}

impl EepromReader for MemoryEeprom {
    fn read(&self, device: EepromDevice, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        let image = self
            .images
            .get(&device)
            .ok_or_else(|| std::io::Error::new(ErrorKind::NotFound, format!("{} not present", device)))?;
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(image.len());
        let available = &image[start..];
        let n = available.len().min(buffer.len());
        buffer[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }
}
