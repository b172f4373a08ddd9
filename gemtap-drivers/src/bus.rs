//! Shared I2C bus
//!
//! The RTC, the EEPROM and the display sit on one I2C peripheral. Each
//! device driver gets its own [`SharedI2c`] handle; every transaction
//! borrows the bus only for its own duration. Everything runs in one
//! cooperative loop, so transactions never overlap.

use core::cell::RefCell;

use embedded_hal::i2c::{Error, ErrorKind, ErrorType, I2c, Operation};

/// Errors from a shared bus handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SharedI2cError<E> {
    /// Bus already borrowed by another handle
    Busy,
    /// Error from the underlying bus
    Bus(E),
}

impl<E: Error> Error for SharedI2cError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            SharedI2cError::Busy => ErrorKind::Other,
            SharedI2cError::Bus(e) => e.kind(),
        }
    }
}

/// Handle to an I2C bus shared through a `RefCell`
pub struct SharedI2c<'a, I> {
    bus: &'a RefCell<I>,
}

impl<'a, I> SharedI2c<'a, I> {
    pub fn new(bus: &'a RefCell<I>) -> Self {
        Self { bus }
    }
}

impl<I> Clone for SharedI2c<'_, I> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<I: I2c> ErrorType for SharedI2c<'_, I> {
    type Error = SharedI2cError<I::Error>;
}

impl<I: I2c> I2c for SharedI2c<'_, I> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bus = self
            .bus
            .try_borrow_mut()
            .map_err(|_| SharedI2cError::Busy)?;
        bus.transaction(address, operations)
            .map_err(SharedI2cError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::NoAcknowledgeSource;

    /// Records the addresses it was asked to talk to
    struct RecordingBus {
        addresses: Vec<u8>,
    }

    impl ErrorType for RecordingBus {
        type Error = ErrorKind;
    }

    impl I2c for RecordingBus {
        fn transaction(
            &mut self,
            address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.addresses.push(address);
            if address == 0x7F {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            Ok(())
        }
    }

    #[test]
    fn test_handles_share_one_bus() {
        let bus = RefCell::new(RecordingBus {
            addresses: Vec::new(),
        });
        let mut rtc = SharedI2c::new(&bus);
        let mut eeprom = rtc.clone();

        rtc.write(0x68, &[0]).unwrap();
        eeprom.write(0x50, &[0, 0]).unwrap();
        rtc.write(0x68, &[0]).unwrap();

        assert_eq!(bus.borrow().addresses, vec![0x68, 0x50, 0x68]);
    }

    #[test]
    fn test_bus_errors_pass_through() {
        let bus = RefCell::new(RecordingBus {
            addresses: Vec::new(),
        });
        let mut handle = SharedI2c::new(&bus);
        let err = handle.write(0x7F, &[0]).unwrap_err();
        assert_eq!(
            err,
            SharedI2cError::Bus(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
        );
        assert_eq!(
            err.kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        );
    }

    #[test]
    fn test_borrowed_bus_reports_busy() {
        let bus = RefCell::new(RecordingBus {
            addresses: Vec::new(),
        });
        let mut handle = SharedI2c::new(&bus);
        let _guard = bus.borrow_mut();
        assert_eq!(handle.write(0x68, &[0]), Err(SharedI2cError::Busy));
    }

    #[test]
    fn test_drives_ds1307() {
        use crate::rtc::Ds1307;
        use gemtap_core::traits::WallClock;

        let bus = RefCell::new(RecordingBus {
            addresses: Vec::new(),
        });
        // Register reads come back as zeros: 00:00 with the clock running
        let mut rtc = Ds1307::new(SharedI2c::new(&bus));
        assert_eq!(rtc.now_minutes(), Some(0));
    }
}
