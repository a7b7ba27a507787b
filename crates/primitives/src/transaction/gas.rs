use super::Clause;
use crate::constants::{
    CLAUSE_GAS, CLAUSE_GAS_CONTRACT_CREATION, TX_DATA_NON_ZERO_GAS, TX_DATA_ZERO_GAS, TX_GAS,
};

/// Computes the gas a transaction with `clauses` consumes before any execution.
///
/// A transaction without clauses is charged as if it carried one call clause.
pub fn intrinsic_gas(clauses: &[Clause]) -> u64 {
    if clauses.is_empty() {
        return TX_GAS + CLAUSE_GAS
    }

    clauses.iter().fold(TX_GAS, |sum, clause| {
        let clause_gas =
            if clause.is_contract_creation() { CLAUSE_GAS_CONTRACT_CREATION } else { CLAUSE_GAS };
        sum.saturating_add(clause_gas).saturating_add(data_gas(&clause.data))
    })
}

fn data_gas(data: &[u8]) -> u64 {
    data.iter().map(|&b| if b == 0 { TX_DATA_ZERO_GAS } else { TX_DATA_NON_ZERO_GAS }).sum()
}
