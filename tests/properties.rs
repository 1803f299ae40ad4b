// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use modbus_rtu_master::{rtu, FunctionCode, Master};
use proptest::prelude::*;

const WRITE: FunctionCode = FunctionCode::WriteMultipleRegisters;
const READ: FunctionCode = FunctionCode::ReadHoldingRegisters;

/// Build the reply a well-behaved slave sends to a write request.
fn echo_write_request(req: &[u8]) -> Vec<u8> {
    let mut rsp = vec![0u8; rtu::write_response_len()];
    rsp[..6].copy_from_slice(&req[..6]);
    rtu::append_crc(&mut rsp, 6).unwrap();
    rsp
}

/// Build the reply a well-behaved slave sends to a read request.
fn read_response(slave: u8, values: &[u16]) -> Vec<u8> {
    let mut rsp = vec![slave, READ.value(), (values.len() * 2) as u8];
    for v in values {
        rsp.extend_from_slice(&v.to_be_bytes());
    }
    rsp.extend_from_slice(&[0, 0]);
    let len = rsp.len();
    rtu::append_crc(&mut rsp, len - 2).unwrap();
    rsp
}

proptest! {
    #[test]
    fn write_request_round_trip(
        slave in 1u8..=247,
        address in any::<u16>(),
        values in proptest::collection::vec(any::<u16>(), 1..=100),
        broadcast in any::<bool>(),
    ) {
        let master = Master::new(slave, 0);
        let quantity = values.len() as u16;
        let len = rtu::write_request_len(quantity);

        let mut req = vec![0u8; len];
        prop_assert_eq!(master.encode_write_request(WRITE, address, &values, broadcast, &mut req), Ok(len));
        prop_assert!(rtu::validate_crc(&req, len));
        prop_assert_eq!(usize::from(req[6]), values.len() * 2);

        let rsp = echo_write_request(&req);
        prop_assert!(master.validate_write_response(&rsp, WRITE, address, quantity, broadcast));
    }

    #[test]
    fn write_response_header_mutation_is_rejected(
        slave in 1u8..=247,
        address in any::<u16>(),
        quantity in 1u16..=100,
        idx in 0usize..6,
        flip in 1u8..=255,
    ) {
        let master = Master::new(slave, 0);
        let values = vec![0x5A5A; usize::from(quantity)];
        let mut req = vec![0u8; rtu::write_request_len(quantity)];
        master.encode_write_request(WRITE, address, &values, false, &mut req).unwrap();

        let mut rsp = echo_write_request(&req);
        rsp[idx] ^= flip;
        prop_assert!(!master.validate_write_response(&rsp, WRITE, address, quantity, false));
    }

    #[test]
    fn exact_length_buffers_are_filled(
        address in any::<u16>(),
        values in proptest::collection::vec(1u16..=u16::MAX, 0..=123),
    ) {
        let master = Master::new(0x05, 0);
        let quantity = values.len() as u16;

        let mut req = vec![0u8; rtu::write_request_len(quantity)];
        master.encode_write_request(WRITE, address, &values, false, &mut req).unwrap();
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(u16::from_be_bytes([req[7 + i * 2], req[8 + i * 2]]), *v);
        }
        prop_assert!(rtu::validate_crc(&req, req.len()));

        let mut req = vec![0u8; rtu::read_request_len()];
        master.encode_read_request(READ, address, quantity, false, &mut req).unwrap();
        prop_assert!(rtu::validate_crc(&req, req.len()));
    }

    #[test]
    fn read_response_values_are_extracted(
        slave in 1u8..=247,
        values in proptest::collection::vec(any::<u16>(), 0..=125),
    ) {
        let master = Master::new(slave, 0);
        let quantity = values.len() as u16;
        let rsp = read_response(slave, &values);
        prop_assert_eq!(rsp.len(), rtu::read_response_len(quantity));
        prop_assert!(master.validate_read_response(&rsp, READ, quantity, false));
        prop_assert!(!master.validate_read_response(&rsp, READ, quantity, true));

        let mut out = vec![0u16; values.len()];
        Master::read_registers(&rsp, quantity, &mut out).unwrap();
        prop_assert_eq!(out, values);
    }

    #[test]
    fn read_response_with_other_byte_count_is_rejected(
        values in proptest::collection::vec(any::<u16>(), 1..=125),
        other in 0u16..=125,
    ) {
        prop_assume!(usize::from(other) != values.len());
        let master = Master::new(0x05, 0);
        let rsp = read_response(0x05, &values);
        prop_assert!(!master.validate_read_response(&rsp, READ, other, false));
    }

    #[test]
    fn broadcast_id_is_written_regardless_of_slave(
        slave in any::<u8>(),
        broadcast_id in any::<u8>(),
    ) {
        let master = Master::new(slave, broadcast_id);
        let mut req = [0u8; 8];
        master.encode_read_request(READ, 0, 1, true, &mut req).unwrap();
        prop_assert_eq!(req[0], broadcast_id);
        master.encode_read_request(READ, 0, 1, false, &mut req).unwrap();
        prop_assert_eq!(req[0], slave);
    }

    #[test]
    fn random_responses_do_not_panic(
        data in proptest::collection::vec(any::<u8>(), 0..260),
        quantity in any::<u16>(),
    ) {
        let master = Master::new(0x05, 0);
        let _ = master.validate_read_response(&data, READ, quantity, false);
        let _ = master.validate_write_response(&data, WRITE, 0, quantity, false);
        let _ = Master::registers(&data, quantity);
    }
}
