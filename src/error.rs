// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::frame::{ExceptionResponse, SlaveId};
use core::fmt;

/// modbus-rtu-master Error
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid buffer size
    BufferSize,
    /// Register quantity exceeds the protocol limit
    Quantity(usize),
    /// Unexpected slave address
    SlaveMismatch { expected: SlaveId, actual: SlaveId },
    /// Unexpected function code
    FnCodeMismatch { expected: u8, actual: u8 },
    /// Echoed start address differs from the request
    AddressMismatch { expected: u16, actual: u16 },
    /// Echoed register quantity differs from the request
    QuantityMismatch { expected: u16, actual: u16 },
    /// Invalid byte count
    ByteCount { expected: usize, actual: u8 },
    /// Invalid CRC
    Crc(u16, u16),
    /// The device answered with an exception
    Exception(ExceptionResponse),
    /// Invalid exception code
    ExceptionCode(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match self {
            BufferSize => write!(f, "Invalid buffer size"),
            Quantity(cnt) => write!(f, "Invalid register quantity: {cnt}"),
            SlaveMismatch { expected, actual } => write!(
                f,
                "Unexpected slave id: expected = {expected}, actual = {actual}"
            ),
            FnCodeMismatch { expected, actual } => write!(
                f,
                "Unexpected function code: expected = 0x{expected:0>2X}, actual = 0x{actual:0>2X}"
            ),
            AddressMismatch { expected, actual } => write!(
                f,
                "Unexpected address: expected = 0x{expected:0>4X}, actual = 0x{actual:0>4X}"
            ),
            QuantityMismatch { expected, actual } => write!(
                f,
                "Unexpected register quantity: expected = {expected}, actual = {actual}"
            ),
            ByteCount { expected, actual } => write!(
                f,
                "Invalid byte count: expected = {expected}, actual = {actual}"
            ),
            Crc(expected, actual) => write!(
                f,
                "Invalid CRC: expected = 0x{expected:0>4X}, actual = 0x{actual:0>4X}"
            ),
            Exception(rsp) => write!(
                f,
                "Modbus exception for function 0x{:0>2X}: {}",
                rsp.function.value(),
                rsp.exception
            ),
            ExceptionCode(code) => write!(f, "Invalid exception code: 0x{code:0>2X}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
