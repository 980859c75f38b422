use crate::SPECIAL_TX_MIN_VERSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialTxType {
    Normal,
    ProviderRegister,
    ProviderUpdateService,
    ProviderUpdateRegistrar,
    ProviderUpdateRevoke,
    Coinbase,
    QuorumCommitment,
    MnHardFork,
    AssetLock,
    AssetUnlock,
    Unknown(u16),
}

impl From<u16> for SpecialTxType {
    fn from(value: u16) -> Self {
        match value {
            0 => SpecialTxType::Normal,
            1 => SpecialTxType::ProviderRegister,
            2 => SpecialTxType::ProviderUpdateService,
            3 => SpecialTxType::ProviderUpdateRegistrar,
            4 => SpecialTxType::ProviderUpdateRevoke,
            5 => SpecialTxType::Coinbase,
            6 => SpecialTxType::QuorumCommitment,
            7 => SpecialTxType::MnHardFork,
            8 => SpecialTxType::AssetLock,
            9 => SpecialTxType::AssetUnlock,
            other => SpecialTxType::Unknown(other),
        }
    }
}

impl From<SpecialTxType> for u16 {
    fn from(value: SpecialTxType) -> Self {
        match value {
            SpecialTxType::Normal => 0,
            SpecialTxType::ProviderRegister => 1,
            SpecialTxType::ProviderUpdateService => 2,
            SpecialTxType::ProviderUpdateRegistrar => 3,
            SpecialTxType::ProviderUpdateRevoke => 4,
            SpecialTxType::Coinbase => 5,
            SpecialTxType::QuorumCommitment => 6,
            SpecialTxType::MnHardFork => 7,
            SpecialTxType::AssetLock => 8,
            SpecialTxType::AssetUnlock => 9,
            SpecialTxType::Unknown(other) => other,
        }
    }
}

/// Splits a raw consensus version word into the transaction version and its
/// special type. The type lives in the upper 16 bits and only counts from
/// version 3 onwards; older words are returned untouched as `Normal`.
pub fn split_version(raw: i32) -> (i32, SpecialTxType) {
    let version = raw & 0xffff;
    let tx_type = ((raw as u32) >> 16) as u16;
    if version >= SPECIAL_TX_MIN_VERSION && tx_type != 0 {
        (version, SpecialTxType::from(tx_type))
    } else {
        (raw, SpecialTxType::Normal)
    }
}
