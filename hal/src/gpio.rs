//! GPIO (General Purpose Input/Output) abstraction

use crate::error::HalResult;

/// GPIO pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

/// Digital input, such as the door switch
pub trait InputPin: Send {
    /// Read current level
    fn read(&self) -> HalResult<Level>;
}

#[cfg(feature = "std")]
pub use sysfs::SysfsPin;

#[cfg(feature = "std")]
mod sysfs {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{InputPin, Level};
    use crate::error::{HalError, HalResult};

    /// Input pin exported through the Linux sysfs GPIO interface.
    ///
    /// Reads the pin's `value` file, which holds `0` or `1`.
    #[derive(Debug, Clone)]
    pub struct SysfsPin {
        value_path: PathBuf,
    }

    impl SysfsPin {
        pub fn new(value_path: impl AsRef<Path>) -> Self {
            Self {
                value_path: value_path.as_ref().to_path_buf(),
            }
        }

        /// Pin exported as `/sys/class/gpio/gpio<number>`
        pub fn exported(number: u32) -> Self {
            Self::new(format!("/sys/class/gpio/gpio{}/value", number))
        }

        pub fn path(&self) -> &Path {
            &self.value_path
        }
    }

    impl InputPin for SysfsPin {
        fn read(&self) -> HalResult<Level> {
            let raw = fs::read_to_string(&self.value_path)?;
            match raw.trim() {
                "0" => Ok(Level::Low),
                "1" => Ok(Level::High),
                _ => Err(HalError::InvalidParameter),
            }
        }
    }

}
