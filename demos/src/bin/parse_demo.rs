// SPDX-License-Identifier: Apache-2.0

//! Parses a small device-config document and prints it back pretty.

use pooljson::{parse, Pool, PoolConfig};

const CONFIG: &str = r#"{
    "device": "sensor-7",
    "interval_ms": 250,
    "thresholds": [0.5, 1.25, 2.5],
    "enabled": true,
    "label": "hall\tA"
}"#;

fn main() {
    let mut pool = Pool::new(PoolConfig::new(64, 8, 8));

    match parse(CONFIG, &mut pool) {
        Ok(root) => {
            print!("{}", pool.encode_pretty(root));
            println!(
                "pool after parse: {}/{} scal, {}/{} dict, {}/{} vect free",
                pool.free_scals(),
                pool.scal_capacity(),
                pool.free_dicts(),
                pool.dict_capacity(),
                pool.free_vects(),
                pool.vect_capacity()
            );
            pool.fire(root);
            println!(
                "pool after fire:  {}/{} scal free",
                pool.free_scals(),
                pool.scal_capacity()
            );
        }
        Err(err) => eprintln!("parse failed: {err}"),
    }
}
