//! Demo of structural comparison with explained divergences
//!
//! This example demonstrates:
//! - Comparing native Rust data through `Reflect`
//! - Comparing hand-built values with shared storage
//! - Cyclic structures terminating
//! - Machine-readable divergence records
//!
//! Run with `RUST_LOG=deepeq=debug` to see the per-call events.

use deepeq_core::logging_facility::{init, Profile};
use deepeq_core::{
    deep_equal, deep_equal_of, shared, Comparator, Record, Reference, Type, Value,
};
use std::collections::BTreeMap;

fn node_ring(values: &[i64]) -> Value {
    let cells: Vec<_> = values.iter().map(|_| shared(Value::Nil)).collect();
    for (i, &v) in values.iter().enumerate() {
        let next = cells[(i + 1) % cells.len()].clone();
        *cells[i].borrow_mut() = Record::new("Node")
            .field("Value", v)
            .field("Next", Reference::to(Type::record("Node"), next))
            .into();
    }
    Reference::to(Type::record("Node"), cells[0].clone()).into()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    println!("== Native data ==\n");

    let before: BTreeMap<String, Vec<i64>> =
        [("a".to_string(), vec![1, 2]), ("b".to_string(), vec![3])]
            .into_iter()
            .collect();
    let mut after = before.clone();
    if let Some(b) = after.get_mut("b") {
        b[0] = 4;
    }

    match deep_equal_of(&before, &after) {
        Ok(()) => println!("equal"),
        Err(divergence) => println!("{divergence}"),
    }
    println!();

    println!("== Cycles ==\n");

    let stats = Comparator::new().compare(&node_ring(&[1, 2]), &node_ring(&[1, 2]))?;
    println!("rings equal: {stats:?}");
    if let Err(divergence) = deep_equal(&node_ring(&[1, 2]), &node_ring(&[1, 5])) {
        println!("{divergence}");
        println!();

        println!("== Record ==\n");
        println!("{}", divergence.to_record().to_json()?);
    }

    Ok(())
}
