#![allow(dead_code)]

use std::{str::FromStr, sync::Arc};

use bchain_indexer::{params::dash, ExtraPayload, ParameterSet, Tx, Vin, Vout};
use bitcoin::{Amount, ScriptBuf, Txid};

pub const HEIGHT: u32 = 1028160;
pub const BLOCK_TIME: i64 = 1551246710;

pub const TX1_HEX: &str = concat!(
    "0100000001f85264d11a747bdba77d411e5e4a3d35e3aeb5843b34a95234a2121ac65496bd000000006b483045022100",
    "dfa158fbd9773fab4f6f329c807e040af0c3a40967cbe01667169b914ed5ad960220061c5876364caa3e3c9c990ad2b4",
    "cc8b1a53d4f954dbda8434b0e67cc8348ff6012103093865e1e132b33a2a5ed01c79d2edba3473826a66cb26b8311bfa",
    "42749c2190ffffffff02ec3f8a2a010000001976a91470dcef2a22575d7a8f0779fb1d6cdd48135bd22788ac3116491d",
    "000000001976a91471348f7780e955a2a60eba17ecc4c826ebc23a9888ac00000000",
);

pub const TX1_PACKED: &str = concat!(
    "0a20ed732a404cdfd4e0475a7a016200b7eef191f2c9de0ffdef8a20091c0499299c12e2010100000001f85264d11a74",
    "7bdba77d411e5e4a3d35e3aeb5843b34a95234a2121ac65496bd000000006b483045022100dfa158fbd9773fab4f6f32",
    "9c807e040af0c3a40967cbe01667169b914ed5ad960220061c5876364caa3e3c9c990ad2b4cc8b1a53d4f954dbda8434",
    "b0e67cc8348ff6012103093865e1e132b33a2a5ed01c79d2edba3473826a66cb26b8311bfa42749c2190ffffffff02ec",
    "3f8a2a010000001976a91470dcef2a22575d7a8f0779fb1d6cdd48135bd22788ac3116491d000000001976a91471348f",
    "7780e955a2a60eba17ecc4c826ebc23a9888ac0000000018f6cad8e305200028c0e03e3299010a001220bd9654c61a12",
    "a23452a9343b84b5aee3353d4a5e1e417da7db7b741ad16452f81800226b483045022100dfa158fbd9773fab4f6f329c",
    "807e040af0c3a40967cbe01667169b914ed5ad960220061c5876364caa3e3c9c990ad2b4cc8b1a53d4f954dbda8434b0",
    "e67cc8348ff6012103093865e1e132b33a2a5ed01c79d2edba3473826a66cb26b8311bfa42749c219028ffffffff0f3a",
    "480a05012a8a3fec10001a1976a91470dcef2a22575d7a8f0779fb1d6cdd48135bd22788ac2222586b7963425831796b",
    "565858733932704169365a51775a50457265396b5348484b483a470a041d49163110011a1976a91471348f7780e955a2",
    "a60eba17ecc4c826ebc23a9888ac2222586d31523974684b426d32455a4b5a657658736d4d5834445677515175546f68",
    "5a754001",
);

pub const TX1_JSON: &str = r#"{"hex":"0100000001f85264d11a747bdba77d411e5e4a3d35e3aeb5843b34a95234a2121ac65496bd000000006b483045022100dfa158fbd9773fab4f6f329c807e040af0c3a40967cbe01667169b914ed5ad960220061c5876364caa3e3c9c990ad2b4cc8b1a53d4f954dbda8434b0e67cc8348ff6012103093865e1e132b33a2a5ed01c79d2edba3473826a66cb26b8311bfa42749c2190ffffffff02ec3f8a2a010000001976a91470dcef2a22575d7a8f0779fb1d6cdd48135bd22788ac3116491d000000001976a91471348f7780e955a2a60eba17ecc4c826ebc23a9888ac00000000","txid":"ed732a404cdfd4e0475a7a016200b7eef191f2c9de0ffdef8a20091c0499299c","size":226,"version":1,"type":0,"locktime":0,"vin":[{"txid":"bd9654c61a12a23452a9343b84b5aee3353d4a5e1e417da7db7b741ad16452f8","vout":0,"scriptSig":{"asm":"3045022100dfa158fbd9773fab4f6f329c807e040af0c3a40967cbe01667169b914ed5ad960220061c5876364caa3e3c9c990ad2b4cc8b1a53d4f954dbda8434b0e67cc8348ff6[ALL]03093865e1e132b33a2a5ed01c79d2edba3473826a66cb26b8311bfa42749c2190","hex":"483045022100dfa158fbd9773fab4f6f329c807e040af0c3a40967cbe01667169b914ed5ad960220061c5876364caa3e3c9c990ad2b4cc8b1a53d4f954dbda8434b0e67cc8348ff6012103093865e1e132b33a2a5ed01c79d2edba3473826a66cb26b8311bfa42749c2190"},"value":55.00000000,"valueSat":5500000000,"address":"Xgcv4bKAXaWf5sjX9KR49L98jeMwNgeXWh","sequence":4294967295}],"vout":[{"value":50.08670700,"valueSat":5008670700,"n":0,"scriptPubKey":{"asm":"OP_DUPOP_HASH16070dcef2a22575d7a8f0779fb1d6cdd48135bd227OP_EQUALVERIFYOP_CHECKSIG","hex":"76a91470dcef2a22575d7a8f0779fb1d6cdd48135bd22788ac","reqSigs":1,"type":"pubkeyhash","addresses":["XkycBX1ykVXXs92pAi6ZQwZPEre9kSHHKH"]}},{"value":4.91329073,"valueSat":491329073,"n":1,"scriptPubKey":{"asm":"OP_DUPOP_HASH16071348f7780e955a2a60eba17ecc4c826ebc23a98OP_EQUALVERIFYOP_CHECKSIG","hex":"76a91471348f7780e955a2a60eba17ecc4c826ebc23a9888ac","reqSigs":1,"type":"pubkeyhash","addresses":["Xm1R9thKBm2EZKZevXsmMX4DVwQQuTohZu"]}}],"blockhash":"000000000000002099caaf1a877911d99a5980ede9b981280eecb291afedf87b","height":1028160,"confirmations":0,"time":1551246710,"blocktime":1551246710,"instantlock":false}"#;

pub const TX2_HEX: &str = concat!(
    "03000500010000000000000000000000000000000000000000000000000000000000000000ffffffff170340b00f1291",
    "af3c09542bc8349901000000002f4e614effffffff024181f809000000001976a9146a341485a9444b35dc9cb90d24e7",
    "483de7d37e0088ac3581f809000000001976a9140d1156f6026bf975ea3553b03fb534d0959c294c88ac000000002601",
    "0040b00f000000000000000000000000000000000000000000000000000000000000000000",
);

/// Record written before the extension section existed.
pub const TX2_PACKED_LEGACY: &str = concat!(
    "0a2071d6975e3b79b52baf26c3269896a34f3bedfb04561c692ffa31f64dada1f9c412b5010300050001000000000000",
    "0000000000000000000000000000000000000000000000000000ffffffff170340b00f1291af3c09542bc83499010000",
    "00002f4e614effffffff024181f809000000001976a9146a341485a9444b35dc9cb90d24e7483de7d37e0088ac3581f8",
    "09000000001976a9140d1156f6026bf975ea3553b03fb534d0959c294c88ac0000000026010040b00f00000000000000",
    "000000000000000000000000000000000000000000000000000018f6cad8e305200028c0e03e32380a2e303334306230",
    "30663132393161663363303935343262633833343939303130303030303030303266346536313465180028ffffffff0f",
    "3a470a0409f8814110001a1976a9146a341485a9444b35dc9cb90d24e7483de7d37e0088ac2222586b4e507242534a74",
    "72485a5576557162334a46346735724d4233757a614a66454c3a470a0409f8813510011a1976a9140d1156f6026bf975",
    "ea3553b03fb534d0959c294c88ac222258627377505868634c716d35414e35677763545479695547535032596e645777",
    "6b394003",
);

/// Tag 10 section carrying the coinbase payload.
pub const TX2_EXTRA_SECTION: &str =
    "522a08051226010040b00f000000000000000000000000000000000000000000000000000000000000000000";

pub const TX2_PAYLOAD: &str =
    "010040b00f000000000000000000000000000000000000000000000000000000000000000000";

pub const TX2_JSON: &str = r#"{"hex":"03000500010000000000000000000000000000000000000000000000000000000000000000ffffffff170340b00f1291af3c09542bc8349901000000002f4e614effffffff024181f809000000001976a9146a341485a9444b35dc9cb90d24e7483de7d37e0088ac3581f809000000001976a9140d1156f6026bf975ea3553b03fb534d0959c294c88ac0000000026010040b00f000000000000000000000000000000000000000000000000000000000000000000","txid":"71d6975e3b79b52baf26c3269896a34f3bedfb04561c692ffa31f64dada1f9c4","size":181,"version":3,"type":5,"locktime":0,"vin":[{"coinbase":"0340b00f1291af3c09542bc8349901000000002f4e614e","sequence":4294967295}],"vout":[{"value":1.67280961,"valueSat":167280961,"n":0,"scriptPubKey":{"asm":"OP_DUPOP_HASH1606a341485a9444b35dc9cb90d24e7483de7d37e00OP_EQUALVERIFYOP_CHECKSIG","hex":"76a9146a341485a9444b35dc9cb90d24e7483de7d37e0088ac","reqSigs":1,"type":"pubkeyhash","addresses":["XkNPrBSJtrHZUvUqb3JF4g5rMB3uzaJfEL"]}},{"value":1.67280949,"valueSat":167280949,"n":1,"scriptPubKey":{"asm":"OP_DUPOP_HASH1600d1156f6026bf975ea3553b03fb534d0959c294cOP_EQUALVERIFYOP_CHECKSIG","hex":"76a9140d1156f6026bf975ea3553b03fb534d0959c294c88ac","reqSigs":1,"type":"pubkeyhash","addresses":["XbswPXhcLqm5AN5gwcTTyiUGSP2YndWwk9"]}}],"extraPayloadSize":38,"extraPayload":"010040b00f000000000000000000000000000000000000000000000000000000000000000000","cbTx":{"version":1,"height":1028160,"merkleRootMNList":"0000000000000000000000000000000000000000000000000000000000000000"},"blockhash":"000000000000002099caaf1a877911d99a5980ede9b981280eecb291afedf87b","height":1028160,"confirmations":0,"time":1551246710,"blocktime":1551246710,"instantlock":false}"#;

pub fn main_params() -> Arc<ParameterSet> {
    Arc::new(dash::main())
}

fn script(hex: &str) -> ScriptBuf {
    ScriptBuf::from_bytes(hex::decode(hex).unwrap())
}

fn vout(n: u32, sat: u64, script_hex: &str, address: &str) -> Vout {
    Vout {
        n,
        value: Amount::from_sat(sat),
        script_pubkey: script(script_hex),
        addresses: vec![address.to_string()],
    }
}

pub fn tx1() -> Tx {
    Tx {
        txid: Txid::from_str("ed732a404cdfd4e0475a7a016200b7eef191f2c9de0ffdef8a20091c0499299c")
            .unwrap(),
        version: 1,
        lock_time: 0,
        hex: hex::decode(TX1_HEX).unwrap(),
        block_time: BLOCK_TIME,
        time: BLOCK_TIME,
        confirmations: 0,
        vin: vec![Vin::outpoint(
            Txid::from_str("bd9654c61a12a23452a9343b84b5aee3353d4a5e1e417da7db7b741ad16452f8")
                .unwrap(),
            0,
            script(concat!(
                "483045022100dfa158fbd9773fab4f6f329c807e040af0c3a40967cbe01667169b914ed5ad960220",
                "061c5876364caa3e3c9c990ad2b4cc8b1a53d4f954dbda8434b0e67cc8348ff6012103093865e1e1",
                "32b33a2a5ed01c79d2edba3473826a66cb26b8311bfa42749c2190",
            )),
            4294967295,
        )],
        vout: vec![
            vout(
                0,
                5008670700,
                "76a91470dcef2a22575d7a8f0779fb1d6cdd48135bd22788ac",
                "XkycBX1ykVXXs92pAi6ZQwZPEre9kSHHKH",
            ),
            vout(
                1,
                491329073,
                "76a91471348f7780e955a2a60eba17ecc4c826ebc23a9888ac",
                "Xm1R9thKBm2EZKZevXsmMX4DVwQQuTohZu",
            ),
        ],
        extra_payload: None,
    }
}

pub fn tx2() -> Tx {
    Tx {
        txid: Txid::from_str("71d6975e3b79b52baf26c3269896a34f3bedfb04561c692ffa31f64dada1f9c4")
            .unwrap(),
        version: 3,
        lock_time: 0,
        hex: hex::decode(TX2_HEX).unwrap(),
        block_time: BLOCK_TIME,
        time: BLOCK_TIME,
        confirmations: 0,
        vin: vec![Vin::coinbase(
            hex::decode("0340b00f1291af3c09542bc8349901000000002f4e614e").unwrap(),
            4294967295,
        )],
        vout: vec![
            vout(
                0,
                167280961,
                "76a9146a341485a9444b35dc9cb90d24e7483de7d37e0088ac",
                "XkNPrBSJtrHZUvUqb3JF4g5rMB3uzaJfEL",
            ),
            vout(
                1,
                167280949,
                "76a9140d1156f6026bf975ea3553b03fb534d0959c294c88ac",
                "XbswPXhcLqm5AN5gwcTTyiUGSP2YndWwk9",
            ),
        ],
        extra_payload: Some(ExtraPayload {
            tx_type: 5,
            payload: hex::decode(TX2_PAYLOAD).unwrap(),
        }),
    }
}

/// Packed form of [`tx2`]: the legacy record followed by the extension.
pub fn tx2_packed() -> Vec<u8> {
    let mut packed = hex::decode(TX2_PACKED_LEGACY).unwrap();
    packed.extend(hex::decode(TX2_EXTRA_SECTION).unwrap());
    packed
}

/// Minimal block holding both fixtures: zeroed header fields apart from the
/// time, then the two transactions.
pub fn block_hex() -> String {
    let mut header = vec![0u8; 80];
    header[0] = 0x01;
    header[4] = 0xaa;
    header[68..72].copy_from_slice(&(BLOCK_TIME as u32).to_le_bytes());
    format!("{}02{}{}", hex::encode(header), TX1_HEX, TX2_HEX)
}
