//! Builds the ring `P1 -> P2 -> A -> P3 -> B`, swaps `A` and `B`, and tears
//! the ring down, dumping it along the way.
//!
//! Run with `RUST_LOG=trace` to see every splice.

use std::error::Error;
use std::io::{self, Write};

use ring_list::List;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut list = List::new();
    let i1 = list.new_node("P1");
    let i2 = list.new_node("P2");
    let i3 = list.new_node("P3");
    let i4 = list.new_node("A");
    let i5 = list.new_node("B");

    writeln!(out, "Items created")?;
    for id in [i1, i2, i3, i4, i5].iter() {
        writeln!(out, "{}", list.node_ref(*id)?)?;
    }

    list.push_back(i1)?;
    list.insert_after(i1, i2)?;
    list.insert_after(i2, i4)?;
    list.insert_after(i4, i3)?;
    list.insert_after(i3, i5)?;
    writeln!(out, "Items added")?;

    list.print_all(&mut out, "Before")?;
    let adjacency = list.swap(i4, i5)?;
    writeln!(out, "Swapped A and B ({:?})", adjacency)?;
    list.print_all(&mut out, "After")?;

    let destroyed = list.destroy_all();
    writeln!(out, "Destroyed {} items, {} left", destroyed, list.node_count())?;
    Ok(())
}
