// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU

use super::*;
use byteorder::{BigEndian, ByteOrder};

pub mod client;
pub use crate::frame::rtu::*;

// [MODBUS over Serial Line Specification and Implementation Guide V1.02](http://modbus.org/docs/Modbus_over_serial_line_V1_02.pdf), page 13
// "The maximum size of a MODBUS RTU frame is 256 bytes."
pub const MAX_FRAME_LEN: usize = 256;

// [MODBUS Application Protocol Specification V1.1b3](https://modbus.org/docs/Modbus_Application_Protocol_V1_1b3.pdf), 6.3 and 6.12
/// Maximum number of registers of a single read request.
pub const MAX_READ_QUANTITY: Quantity = 125;
/// Maximum number of registers of a single write request.
pub const MAX_WRITE_QUANTITY: Quantity = 123;

/// Number of trailing CRC bytes of every frame.
pub const CRC_LEN: usize = 2;

// Byte offsets shared by all frames.
pub(crate) const SLAVE_IDX: usize = 0;
pub(crate) const FN_CODE_IDX: usize = 1;
pub(crate) const ADDRESS_IDX: usize = 2;
pub(crate) const QUANTITY_IDX: usize = 4;

// Write request
pub(crate) const WRITE_BYTE_COUNT_IDX: usize = 6;
pub(crate) const WRITE_VALUES_IDX: usize = 7;

// Read response
pub(crate) const READ_BYTE_COUNT_IDX: usize = 2;
pub(crate) const READ_VALUES_IDX: usize = 3;

// Exception response: slave, function | 0x80, exception code
pub(crate) const EXCEPTION_LEN: usize = 3;

const READ_REQUEST_LEN: usize = 8;
const WRITE_RESPONSE_LEN: usize = 8;

/// Length of a read request frame.
#[must_use]
pub const fn read_request_len() -> usize {
    READ_REQUEST_LEN
}

/// Length of the response to a read request of `quantity` registers.
#[must_use]
pub const fn read_response_len(quantity: Quantity) -> usize {
    READ_VALUES_IDX + quantity as usize * 2 + CRC_LEN
}

/// Length of a write request frame carrying `quantity` registers.
#[must_use]
pub const fn write_request_len(quantity: Quantity) -> usize {
    WRITE_VALUES_IDX + quantity as usize * 2 + CRC_LEN
}

/// Length of the response to a write request.
#[must_use]
pub const fn write_response_len() -> usize {
    WRITE_RESPONSE_LEN
}

/// Calculate the CRC (Cyclic Redundancy Check) sum.
///
/// The bytes of the result are swapped, i.e. writing it big-endian
/// puts the low byte on the wire first, as Modbus RTU demands.
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0xFFFF;
    for x in data {
        crc ^= u16::from(*x);
        for _ in 0..8 {
            // if we followed clippy's suggestion to move out the crc >>= 1, the condition may not be met any more
            // the recommended action therefore makes no sense and it is better to allow this lint
            #[allow(clippy::branches_sharing_code)]
            if (crc & 0x0001) != 0 {
                crc >>= 1;
                crc ^= 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc.rotate_right(8)
}

/// Append the CRC of `buf[..len]` to `buf`.
///
/// Returns the length of the complete frame.
pub fn append_crc(buf: &mut [u8], len: usize) -> Result<usize> {
    let total_len = len.checked_add(CRC_LEN).ok_or(Error::BufferSize)?;
    if buf.len() < total_len {
        return Err(Error::BufferSize);
    }
    let crc = crc16(&buf[..len]);
    BigEndian::write_u16(&mut buf[len..total_len], crc);
    Ok(total_len)
}

/// Verify the trailing CRC of the frame `buf[..total_len]`.
pub fn check_crc(buf: &[u8], total_len: usize) -> Result<()> {
    if total_len < CRC_LEN || buf.len() < total_len {
        return Err(Error::BufferSize);
    }
    let (adu_buf, crc_buf) = buf[..total_len].split_at(total_len - CRC_LEN);
    let expected_crc = BigEndian::read_u16(crc_buf);
    let actual_crc = crc16(adu_buf);
    if expected_crc != actual_crc {
        return Err(Error::Crc(expected_crc, actual_crc));
    }
    Ok(())
}

/// Returns `true` if the frame `buf[..total_len]` ends with a valid CRC.
#[must_use]
pub fn validate_crc(buf: &[u8], total_len: usize) -> bool {
    check_crc(buf, total_len).is_ok()
}
