#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

use plotters::prelude::*;
use primemap::{ChainedMap, OpenAddressingMap, StringMap, find_mode, hash};
use rand::Rng;

/// Keys inserted per variant for the load factor chart
const CHART_KEYS: usize = 500;
/// Keys are drawn from `0..KEY_SPACE`, so some inserts are updates
const KEY_SPACE: usize = 2_000;

const VARIANTS: [&str; 2] = ["Open addressing (quadratic)", "Separate chaining"];

/// Prints `empty buckets, load, size, capacity` every `every` insertions
fn bulk_put_trace<M: StringMap<usize>>(
    map: &mut M,
    count: usize,
    every: usize,
    key_of: fn(usize) -> String,
) {
    for i in 0..count {
        map.put(key_of(i), i * 100);
        if i % every == every - 1 {
            println!(
                "{} {:.2} {} {}",
                map.empty_buckets(),
                map.load_factor(),
                map.len(),
                map.capacity()
            );
        }
    }
}

/// Load factor after each of `keys` is inserted
fn load_curve<M: StringMap<usize>>(mut map: M, keys: &[String]) -> Vec<f64> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            map.put(key.clone(), i);
            map.load_factor()
        })
        .collect()
}

fn print_traces() {
    println!("\nOpen addressing - put example 1");
    println!("-------------------------------");
    let mut open = OpenAddressingMap::with_hasher(53, hash::char_sum);
    bulk_put_trace(&mut open, 150, 25, |i| format!("str{i}"));

    println!("\nOpen addressing - put example 2");
    println!("-------------------------------");
    let mut open = OpenAddressingMap::with_hasher(41, hash::weighted_char_sum);
    bulk_put_trace(&mut open, 50, 10, |i| format!("str{}", i / 3));

    println!("\nSeparate chaining - put example 1");
    println!("---------------------------------");
    let mut chained = ChainedMap::with_hasher(53, hash::char_sum);
    bulk_put_trace(&mut chained, 150, 25, |i| format!("str{i}"));

    println!("\nSeparate chaining - put example 2");
    println!("---------------------------------");
    let mut chained = ChainedMap::with_hasher(41, hash::weighted_char_sum);
    bulk_put_trace(&mut chained, 50, 10, |i| format!("str{}", i / 3));

    println!("\nOpen addressing - remove and reuse");
    println!("----------------------------------");
    let mut open = OpenAddressingMap::with_hasher(11, hash::char_sum);
    for key in ["ab", "ba", "cd"] {
        open.put(key, key.len());
    }
    open.remove("ab");
    open.put("dc", 2);
    print!("{open}");

    println!("\nfind_mode examples");
    println!("------------------");
    let cases: [&[&str]; 3] = [
        &["apple", "apple", "grape", "melon", "peach"],
        &["Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu"],
        &["one", "two", "three", "four", "five"],
    ];
    for case in cases {
        let mode = find_mode(case.iter().copied());
        println!("Input: {case:?}\nMode : {:?}, Frequency: {}\n", mode.modes, mode.frequency);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    print_traces();

    let mut rng = rand::rng();
    let keys: Vec<String> =
        (0..CHART_KEYS).map(|_| format!("key{}", rng.random_range(0..KEY_SPACE))).collect();

    let curves = [
        load_curve(OpenAddressingMap::new(), &keys),
        load_curve(ChainedMap::new(), &keys),
    ];

    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
    ];

    let root = BitMapBackend::new("load_factor.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Load Factor While Inserting Random Keys", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..CHART_KEYS, 0.0..1.1)?;

    chart
        .configure_mesh()
        .x_desc("Number of Insertions")
        .y_desc("Load Factor (size / capacity)")
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (variant_idx, &variant) in VARIANTS.iter().enumerate() {
        let color = &colors[variant_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                curves[variant_idx].iter().enumerate().map(|(i, &load)| (i, load)),
                line_style,
            ))?
            .label(variant)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    println!("Generated plot image: load_factor.png");

    Ok(())
}
