#![allow(missing_docs)]
//! Host-level tests for layouts and strip topologies.

use std::collections::HashSet;

use word_clock::color::Color;
use word_clock::frame::{Frame, Pixel};
use word_clock::layout::{
    LED_COUNT, LedLayout, LogicalAddress, PhysicalIndex, Special, Topology,
};

const TOPOLOGIES: [(&str, Topology); 4] = [
    ("horizontal 1", Topology::HORIZONTAL_1),
    ("vertical 1", Topology::VERTICAL_1),
    ("vertical 2", Topology::VERTICAL_2),
    ("vertical 3", Topology::VERTICAL_3),
];

fn assert_injective(name: &str, topology: &Topology) {
    let mut seen = HashSet::new();
    for address in LogicalAddress::all() {
        if let Some(index) = topology.resolve(address) {
            assert!(index.get() < LED_COUNT, "{name}: {address:?} out of range");
            assert!(seen.insert(index), "{name}: {address:?} collides at {index:?}");
        }
    }
}

#[test]
fn every_topology_is_injective() {
    for (name, topology) in TOPOLOGIES {
        assert_injective(name, &topology);
        assert_injective(name, &topology.with_alarm_on_corner());
    }
}

#[test]
fn full_topologies_claim_every_led() {
    for (name, topology) in TOPOLOGIES {
        assert_eq!(topology.claimed().count(), LED_COUNT, "{name}");
    }
}

#[test]
fn horizontal_rows_alternate_direction() {
    let topology = Topology::HORIZONTAL_1;
    let index = |row, col| {
        topology
            .resolve(LogicalAddress::grid(row, col))
            .map(PhysicalIndex::get)
    };
    assert_eq!(index(0, 0), Some(0));
    assert_eq!(index(0, 10), Some(10));
    assert_eq!(index(1, 10), Some(11));
    assert_eq!(index(1, 0), Some(21));
    assert_eq!(index(9, 0), Some(109));
    assert_eq!(
        topology
            .resolve(LogicalAddress::Special(Special::CornerBottomLeft))
            .map(PhysicalIndex::get),
        Some(110)
    );
}

#[test]
fn alarm_on_corner_removes_the_top_right_minute() {
    let topology = Topology::HORIZONTAL_1.with_alarm_on_corner();
    assert_eq!(
        topology.resolve(LogicalAddress::Special(Special::CornerTopRight)),
        None
    );
    assert_eq!(
        topology
            .resolve(LogicalAddress::Special(Special::Alarm))
            .map(PhysicalIndex::get),
        Some(112)
    );
}

#[test]
fn absent_specials_stay_dark_on_the_strip() {
    let topology = Topology::VERTICAL_1.with_alarm_on_corner();
    let frame = Frame::filled(Pixel::new(Color::Orange, 30));
    let strip = topology.to_strip(&frame);
    let lit = strip.pixels().iter().filter(|pixel| !pixel.is_off()).count();
    assert_eq!(lit, LED_COUNT - 1);
}

#[test]
fn serpentine_column_major_3x2_matches_expected() {
    const MAP: LedLayout<6, 3, 2> = LedLayout::serpentine_column_major();
    assert_eq!(
        *MAP.cells(),
        [(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)]
    );
}

#[test]
fn serpentine_row_major_3x2_matches_expected() {
    const MAP: LedLayout<6, 3, 2> = LedLayout::serpentine_row_major();
    assert_eq!(
        *MAP.cells(),
        [(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]
    );
}

#[test]
fn strip_order_inverts_the_cells() {
    const MAP: LedLayout<6, 3, 2> = LedLayout::serpentine_row_major();
    let inverse = MAP.strip_order();
    for (index, (col, row)) in MAP.cells().iter().enumerate() {
        let cell = usize::from(*row) * 3 + usize::from(*col);
        assert_eq!(usize::from(inverse[cell]), index);
    }
}

#[test]
#[should_panic(expected = "grid cell wired twice")]
fn duplicate_cells_are_rejected() {
    let _ = LedLayout::<3, 3, 1>::new([(0, 0), (1, 0), (1, 0)]);
}

#[test]
#[should_panic(expected = "cell outside the grid")]
fn out_of_bounds_cells_are_rejected() {
    let _ = LedLayout::<2, 2, 1>::new([(0, 0), (2, 0)]);
}

#[test]
#[should_panic(expected = "two specials share a physical index")]
fn colliding_specials_are_rejected() {
    let _ = Topology::new(
        LedLayout::serpentine_row_major(),
        [Some(110), Some(110), None, None, None],
    );
}
