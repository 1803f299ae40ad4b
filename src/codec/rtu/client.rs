// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU client (master) specific functions.
//!
//! A request/response cycle looks like this:
//!
//! 1. size a buffer with one of the length functions of [`crate::rtu`]
//! 2. fill it with [`Master::encode_read_request`] or [`Master::encode_write_request`]
//! 3. send it and receive the reply into a buffer of the matching response length
//! 4. check the reply with [`Master::validate_read_response`] or
//!    [`Master::validate_write_response`]
//! 5. extract the values of a read response with [`Master::read_registers`]
use super::*;

/// Encodes requests to and validates responses of a single slave.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Master {
    device: Device,
}

impl Master {
    #[must_use]
    pub const fn new(slave: SlaveId, broadcast: SlaveId) -> Self {
        Self {
            device: Device::new(slave, broadcast),
        }
    }

    #[must_use]
    pub const fn device(&self) -> Device {
        self.device
    }

    #[must_use]
    pub const fn slave(&self) -> SlaveId {
        self.device.slave()
    }

    pub fn set_slave(&mut self, slave: SlaveId) {
        self.device.set_slave(slave);
    }

    #[must_use]
    pub const fn broadcast(&self) -> SlaveId {
        self.device.broadcast()
    }

    /// Encode a read request.
    ///
    /// Returns the number of bytes written, i.e. [`read_request_len`].
    pub fn encode_read_request(
        &self,
        function: FunctionCode,
        address: Address,
        quantity: Quantity,
        broadcast: bool,
        buf: &mut [u8],
    ) -> Result<usize> {
        if quantity > MAX_READ_QUANTITY {
            #[cfg(feature = "log")]
            log::error!("Refusing to read {quantity} registers (max. {MAX_READ_QUANTITY})");
            return Err(Error::Quantity(quantity.into()));
        }
        let len = read_request_len();
        if buf.len() < len {
            #[cfg(feature = "log")]
            log::error!("Read request needs {len} bytes, buffer has {}", buf.len());
            return Err(Error::BufferSize);
        }
        self.encode_header(function, address, quantity, broadcast, buf);
        append_crc(buf, len - CRC_LEN)
    }

    /// Encode a write request for the registers `values`.
    ///
    /// The register quantity is the number of values.
    /// Returns the number of bytes written, i.e. [`write_request_len`].
    pub fn encode_write_request(
        &self,
        function: FunctionCode,
        address: Address,
        values: &[Word],
        broadcast: bool,
        buf: &mut [u8],
    ) -> Result<usize> {
        if values.len() > usize::from(MAX_WRITE_QUANTITY) {
            #[cfg(feature = "log")]
            log::error!(
                "Refusing to write {} registers (max. {MAX_WRITE_QUANTITY})",
                values.len()
            );
            return Err(Error::Quantity(values.len()));
        }
        let quantity =
            Quantity::try_from(values.len()).map_err(|_| Error::Quantity(values.len()))?;
        let byte_count =
            u8::try_from(values.len() * 2).map_err(|_| Error::Quantity(values.len()))?;
        let len = write_request_len(quantity);
        if buf.len() < len {
            #[cfg(feature = "log")]
            log::error!("Write request needs {len} bytes, buffer has {}", buf.len());
            return Err(Error::BufferSize);
        }
        self.encode_header(function, address, quantity, broadcast, buf);
        buf[WRITE_BYTE_COUNT_IDX] = byte_count;
        for (i, value) in values.iter().enumerate() {
            write_word(buf, WRITE_VALUES_IDX + i * 2, *value);
        }
        append_crc(buf, len - CRC_LEN)
    }

    fn encode_header(
        &self,
        function: FunctionCode,
        address: Address,
        quantity: Quantity,
        broadcast: bool,
        buf: &mut [u8],
    ) {
        buf[SLAVE_IDX] = self.device.target(broadcast);
        buf[FN_CODE_IDX] = function.value();
        write_word(buf, ADDRESS_IDX, address);
        write_word(buf, QUANTITY_IDX, quantity);
    }

    /// Check a write response field by field.
    ///
    /// The fields are checked in wire order and the first mismatch is
    /// returned: slave id, function code, echoed address, echoed
    /// quantity and finally the CRC.
    pub fn check_write_response(
        &self,
        buf: &[u8],
        function: FunctionCode,
        address: Address,
        quantity: Quantity,
        broadcast: bool,
    ) -> Result<()> {
        let res = self.check_write_response_fields(buf, function, address, quantity, broadcast);
        #[cfg(feature = "log")]
        if let Err(err) = res {
            log_rejected("write", err);
        }
        res
    }

    fn check_write_response_fields(
        &self,
        buf: &[u8],
        function: FunctionCode,
        address: Address,
        quantity: Quantity,
        broadcast: bool,
    ) -> Result<()> {
        self.check_prefix(buf, function, broadcast)?;
        let len = write_response_len();
        if buf.len() < len {
            return Err(Error::BufferSize);
        }
        let actual = read_word(buf, ADDRESS_IDX);
        if actual != address {
            return Err(Error::AddressMismatch {
                expected: address,
                actual,
            });
        }
        let actual = read_word(buf, QUANTITY_IDX);
        if actual != quantity {
            return Err(Error::QuantityMismatch {
                expected: quantity,
                actual,
            });
        }
        check_crc(buf, len)
    }

    /// Returns `true` if `buf` holds the response to a write request
    /// with the given parameters.
    #[must_use]
    pub fn validate_write_response(
        &self,
        buf: &[u8],
        function: FunctionCode,
        address: Address,
        quantity: Quantity,
        broadcast: bool,
    ) -> bool {
        self.check_write_response(buf, function, address, quantity, broadcast)
            .is_ok()
    }

    /// Check a read response field by field.
    ///
    /// The fields are checked in wire order and the first mismatch is
    /// returned: slave id, function code, byte count and finally the CRC.
    pub fn check_read_response(
        &self,
        buf: &[u8],
        function: FunctionCode,
        quantity: Quantity,
        broadcast: bool,
    ) -> Result<()> {
        let res = self.check_read_response_fields(buf, function, quantity, broadcast);
        #[cfg(feature = "log")]
        if let Err(err) = res {
            log_rejected("read", err);
        }
        res
    }

    fn check_read_response_fields(
        &self,
        buf: &[u8],
        function: FunctionCode,
        quantity: Quantity,
        broadcast: bool,
    ) -> Result<()> {
        self.check_prefix(buf, function, broadcast)?;
        if buf.len() <= READ_BYTE_COUNT_IDX {
            return Err(Error::BufferSize);
        }
        let expected = quantity as usize * 2;
        let actual = buf[READ_BYTE_COUNT_IDX];
        if usize::from(actual) != expected {
            return Err(Error::ByteCount { expected, actual });
        }
        check_crc(buf, read_response_len(quantity))
    }

    /// Returns `true` if `buf` holds the response to a read request of
    /// `quantity` registers.
    #[must_use]
    pub fn validate_read_response(
        &self,
        buf: &[u8],
        function: FunctionCode,
        quantity: Quantity,
        broadcast: bool,
    ) -> bool {
        self.check_read_response(buf, function, quantity, broadcast)
            .is_ok()
    }

    /// Check the slave id and the function code.
    ///
    /// A CRC-valid exception frame in place of the expected function
    /// code is reported as [`Error::Exception`].
    fn check_prefix(&self, buf: &[u8], function: FunctionCode, broadcast: bool) -> Result<()> {
        if buf.len() <= FN_CODE_IDX {
            return Err(Error::BufferSize);
        }
        let expected = self.device.target(broadcast);
        let actual = buf[SLAVE_IDX];
        if actual != expected {
            return Err(Error::SlaveMismatch { expected, actual });
        }
        let expected = function.value();
        let actual = buf[FN_CODE_IDX];
        if actual == expected {
            return Ok(());
        }
        if actual == function.exception_value()
            && check_crc(buf, EXCEPTION_LEN + CRC_LEN).is_ok()
        {
            let rsp = ExceptionResponse::try_from(&buf[FN_CODE_IDX..EXCEPTION_LEN])?;
            return Err(Error::Exception(rsp));
        }
        Err(Error::FnCodeMismatch { expected, actual })
    }

    /// Copy the register values of a read response into `values`.
    ///
    /// The response must have been validated before, only the buffer
    /// bounds are checked here.
    pub fn read_registers(buf: &[u8], quantity: Quantity, values: &mut [Word]) -> Result<()> {
        Self::registers(buf, quantity)?.copy_to(values)
    }

    /// Borrow the register values of a read response.
    ///
    /// The response must have been validated before, only the buffer
    /// bounds are checked here.
    pub fn registers(buf: &[u8], quantity: Quantity) -> Result<Registers<'_>> {
        let payload = buf.get(READ_VALUES_IDX..).ok_or(Error::BufferSize)?;
        Registers::new(payload, quantity.into())
    }
}

#[cfg(feature = "log")]
fn log_rejected(kind: &str, err: Error) {
    match err {
        Error::Exception(rsp) => log::warn!("Device rejected {kind} request: {}", rsp.exception),
        err => log::debug!("Invalid {kind} response: {err}"),
    }
}
