// SPDX-License-Identifier: Apache-2.0

//! Builds a tree by hand, mutates it, and shows both encodings.

use pooljson::{Pool, PoolConfig};

fn main() {
    let mut pool = Pool::new(PoolConfig::new(32, 4, 4));

    let Some(root) = pool.hire_dict() else {
        eprintln!("dict pool exhausted");
        return;
    };
    let Some(readings) = pool.hire_vect() else {
        eprintln!("vect pool exhausted");
        return;
    };

    for value in [12, 19, 7] {
        if let Some(id) = pool.hire_int(value) {
            pool.push(readings, id);
        }
    }
    if let Some(name) = pool.hire_str("bench rig") {
        pool.set_prop(root, "name", name);
    }
    pool.set_prop(root, "readings", readings);

    println!("compact: {}", pool.encode(root));

    // re-type the first reading in place
    if let Some(first) = pool.get_item(readings, 0).and_then(|id| id.as_scal()) {
        pool.set_real(first, 12.5);
    }

    print!("pretty after retype:\n{}", pool.encode_pretty(root));

    pool.fire(root);
}
