use bchain_payload::{
    deserialize, serialize, BlsSignature, CbTx, Maybe, ProUpRevTx, RawBytes, SpecialPayload,
    SpecialTxType,
};
use bitcoin::Txid;

#[test]
fn test_coinbase_payload_v1() {
    let fixtures = [(
        "010040b00f000000000000000000000000000000000000000000000000000000000000000000",
        CbTx {
            version: 1,
            height: 1028160,
            merkle_root_mn_list: [0u8; 32],
            merkle_root_quorums: Maybe(None),
            rest: RawBytes::default(),
        },
    )];

    for (raw, expected_data) in fixtures {
        let bytes = hex::decode(raw).unwrap();
        let payload = SpecialPayload::decode(5, &bytes).unwrap();
        assert!(std::matches!(payload, SpecialPayload::Coinbase(_)));
        assert_eq!(payload.tx_type(), SpecialTxType::Coinbase);

        if let SpecialPayload::Coinbase(data) = &payload {
            assert_eq!(data, &expected_data);
        }
        assert_eq!(payload.to_bytes(), bytes);
    }
}

#[test]
fn test_coinbase_payload_v2_and_later() {
    let mut raw = vec![0x02, 0x00];
    raw.extend_from_slice(&1028160u32.to_le_bytes());
    raw.extend_from_slice(&[0x11; 32]);
    raw.extend_from_slice(&[0x22; 32]);

    let cbtx = deserialize::<CbTx>(&raw).unwrap();
    assert_eq!(cbtx.version, 2);
    assert_eq!(cbtx.merkle_root_mn_list, [0x11; 32]);
    assert_eq!(cbtx.merkle_root_quorums, Maybe(Some([0x22; 32])));
    assert!(cbtx.rest.0.is_empty());

    // version 3 appends chainlock data which stays opaque
    raw[0] = 0x03;
    raw.extend_from_slice(&[0x01, 0xaa, 0xbb]);
    let cbtx = deserialize::<CbTx>(&raw).unwrap();
    assert_eq!(cbtx.version, 3);
    assert_eq!(cbtx.rest, RawBytes(vec![0x01, 0xaa, 0xbb]));
    assert_eq!(serialize(&cbtx), raw);
}

#[test]
fn test_partial_quorum_root_is_rejected() {
    let mut raw = vec![0x02, 0x00];
    raw.extend_from_slice(&1028160u32.to_le_bytes());
    raw.extend_from_slice(&[0x11; 32]);
    raw.extend_from_slice(&[0x22; 10]);

    assert!(deserialize::<CbTx>(&raw).is_err());
    assert!(SpecialPayload::decode(5, &raw).is_err());

    // a single trailing byte is not an absent root either
    raw.truncate(2 + 4 + 32 + 1);
    assert!(deserialize::<CbTx>(&raw).is_err());
}

#[test]
fn test_truncated_coinbase_payload() {
    let raw = hex::decode("0100").unwrap();
    assert!(SpecialPayload::decode(5, &raw).is_err());
}

#[test]
fn test_provider_update_revoke() {
    let pro_tx_hash: Txid = "ed732a404cdfd4e0475a7a016200b7eef191f2c9de0ffdef8a20091c0499299c"
        .parse()
        .unwrap();
    let revoke = ProUpRevTx {
        version: 1,
        pro_tx_hash,
        reason: 3,
        inputs_hash: [0x5a; 32],
        sig: BlsSignature([0x07; 96]),
    };

    let raw = serialize(&revoke);
    assert_eq!(raw.len(), 2 + 32 + 2 + 32 + 96);

    let payload = SpecialPayload::decode(4, &raw).unwrap();
    assert_eq!(payload, SpecialPayload::ProviderUpdateRevoke(revoke));
    assert_eq!(payload.to_bytes(), raw);
}

#[test]
fn test_opaque_payload() {
    let raw = vec![0xde, 0xad, 0xbe, 0xef];
    let payload = SpecialPayload::decode(6, &raw).unwrap();
    assert_eq!(
        payload,
        SpecialPayload::Other(SpecialTxType::QuorumCommitment, RawBytes(raw.clone()))
    );
    assert_eq!(payload.to_bytes(), raw);

    let payload = SpecialPayload::decode(300, &raw).unwrap();
    assert_eq!(payload.tx_type(), SpecialTxType::Unknown(300));
}
