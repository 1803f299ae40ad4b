// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{error::*, frame::*};
use core::convert::TryFrom;

pub mod rtu;

type Result<T> = core::result::Result<T, Error>;

impl TryFrom<u8> for Exception {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        use crate::frame::Exception::*;
        let ex = match code {
            0x01 => IllegalFunction,
            0x02 => IllegalDataAddress,
            0x03 => IllegalDataValue,
            0x04 => ServerDeviceFailure,
            0x05 => Acknowledge,
            0x06 => ServerDeviceBusy,
            0x08 => MemoryParityError,
            0x0A => GatewayPathUnavailable,
            0x0B => GatewayTargetDevice,
            _ => {
                return Err(Error::ExceptionCode(code));
            }
        };
        Ok(ex)
    }
}

impl TryFrom<&[u8]> for ExceptionResponse {
    type Error = Error;

    /// Decode the function and exception code of an exception PDU.
    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 2 {
            return Err(Error::BufferSize);
        }
        let fn_err_code = bytes[0];
        if fn_err_code < 0x80 {
            return Err(Error::FnCodeMismatch {
                expected: fn_err_code | 0x80,
                actual: fn_err_code,
            });
        }
        let function = (fn_err_code - 0x80).into();
        let exception = Exception::try_from(bytes[1])?;
        Ok(ExceptionResponse {
            function,
            exception,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_from_code() {
        assert_eq!(Exception::try_from(0x02), Ok(Exception::IllegalDataAddress));
        assert_eq!(Exception::try_from(0x0B), Ok(Exception::GatewayTargetDevice));
        assert_eq!(Exception::try_from(0x07), Err(Error::ExceptionCode(0x07)));
    }

    #[test]
    fn exception_response_from_bytes() {
        let data: &[u8] = &[0x79, 0x02];
        assert!(ExceptionResponse::try_from(data).is_err());

        let data: &[u8] = &[0x83];
        assert_eq!(ExceptionResponse::try_from(data), Err(Error::BufferSize));

        let bytes: &[u8] = &[0x83, 0x02];
        let rsp = ExceptionResponse::try_from(bytes).unwrap();
        assert_eq!(
            rsp,
            ExceptionResponse {
                function: FunctionCode::ReadHoldingRegisters,
                exception: Exception::IllegalDataAddress,
            }
        );

        let bytes: &[u8] = &[0x90, 0x04];
        let rsp = ExceptionResponse::try_from(bytes).unwrap();
        assert_eq!(rsp.function, FunctionCode::WriteMultipleRegisters);
        assert_eq!(rsp.exception, Exception::ServerDeviceFailure);
    }
}
