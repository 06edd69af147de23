// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate mandel;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use itertools::Itertools;
use num::Complex;
use std::str::FromStr;
use std::time::Instant;

use mandel::{build_palette, render_to_file, FrameSpec, Rgb, Viewport};

/// Given a string and a separator, returns the two values separated
/// by the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

/// Three comma-separated values, e.g. an RGB triple or the palette
/// exponents.
fn parse_triple<T: FromStr>(s: &str) -> Option<(T, T, T)> {
    s.split(',')
        .map(T::from_str)
        .collect::<Result<Vec<T>, _>>()
        .ok()
        .and_then(|values| values.into_iter().collect_tuple())
}

/// Four comma-separated values: the explicit viewport edges.
fn parse_quad<T: FromStr>(s: &str) -> Option<(T, T, T, T)> {
    s.split(',')
        .map(T::from_str)
        .collect::<Result<Vec<T>, _>>()
        .ok()
        .and_then(|values| values.into_iter().collect_tuple())
}

fn parse_rgb(s: &str) -> Option<Rgb> {
    parse_triple::<u8>(s).map(|(r, g, b)| Rgb(r, g, b))
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_triple<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match parse_triple::<T>(s) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_zoom(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(zoom) if zoom.is_finite() && zoom > 0.0 => Ok(()),
        _ => Err("Zoom must be a positive number".to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const BOUNDS: &str = "bounds";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const LOW: &str = "low";
const HIGH: &str = "high";
const EXPONENTS: &str = "exponents";
const INTERIOR: &str = "interior";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output image file; format follows the extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1200x1200")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .default_value("-0.675,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse viewport center"))
                .help("Center of the viewport on the complex plane, RE,IM"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_zoom(&s))
                .help("Zoom level; each increment halves the visible range"),
        )
        .arg(
            Arg::with_name(BOUNDS)
                .required(false)
                .long(BOUNDS)
                .short("b")
                .takes_value(true)
                .allow_hyphen_values(true)
                .conflicts_with_all(&[CENTER, ZOOM])
                .validator(|s| match parse_quad::<f64>(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse viewport bounds".to_string()),
                })
                .help("Explicit viewport edges, LEFT,RIGHT,BOTTOM,TOP"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range(
                        &s,
                        2,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 2 and 100000",
                    )
                })
                .help("Iteration budget per pixel; also the palette size"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of rendering threads"),
        )
        .arg(
            Arg::with_name(LOW)
                .required(false)
                .long(LOW)
                .takes_value(true)
                .default_value("0,0,0")
                .validator(|s| validate_triple::<u8>(&s, "Could not parse low palette color"))
                .help("Palette color for the fastest-escaping points, R,G,B"),
        )
        .arg(
            Arg::with_name(HIGH)
                .required(false)
                .long(HIGH)
                .takes_value(true)
                .default_value("255,128,255")
                .validator(|s| validate_triple::<u8>(&s, "Could not parse high palette color"))
                .help("Palette color for the slowest-escaping points, R,G,B"),
        )
        .arg(
            Arg::with_name(EXPONENTS)
                .required(false)
                .long(EXPONENTS)
                .takes_value(true)
                .default_value("0.75,2,0.5")
                .validator(|s| validate_triple::<f64>(&s, "Could not parse palette exponents"))
                .help("Per-channel ramp exponents; below 1 brightens early"),
        )
        .arg(
            Arg::with_name(INTERIOR)
                .required(false)
                .long(INTERIOR)
                .takes_value(true)
                .validator(|s| validate_triple::<u8>(&s, "Could not parse interior color"))
                .help("Flat color for points that never escape, R,G,B"),
        )
        .get_matches()
}

fn run() -> Result<(), Error> {
    let matches = args();

    let (width, height) = parse_pair::<usize>(matches.value_of(SIZE).unwrap(), 'x')
        .ok_or_else(|| format_err!("could not parse image size"))?;
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())?;
    let threads = usize::from_str(matches.value_of(THREADS).unwrap())?;

    let viewport = match matches.value_of(BOUNDS) {
        Some(bounds) => {
            let (left, right, bottom, top) = parse_quad::<f64>(bounds)
                .ok_or_else(|| format_err!("could not parse viewport bounds"))?;
            Viewport::from_bounds(left, right, bottom, top)?
        }
        None => {
            let center = parse_complex(matches.value_of(CENTER).unwrap())
                .ok_or_else(|| format_err!("could not parse viewport center"))?;
            let zoom = f64::from_str(matches.value_of(ZOOM).unwrap())?;
            Viewport::centered(center, zoom, width, height)?
        }
    };

    let low = parse_rgb(matches.value_of(LOW).unwrap())
        .ok_or_else(|| format_err!("could not parse low palette color"))?;
    let high = parse_rgb(matches.value_of(HIGH).unwrap())
        .ok_or_else(|| format_err!("could not parse high palette color"))?;
    let exponents = parse_triple::<f64>(matches.value_of(EXPONENTS).unwrap())
        .ok_or_else(|| format_err!("could not parse palette exponents"))?;
    let interior = match matches.value_of(INTERIOR) {
        Some(s) => {
            Some(parse_rgb(s).ok_or_else(|| format_err!("could not parse interior color"))?)
        }
        None => None,
    };

    let palette = build_palette(iterations, low, high, exponents, interior)?;
    let spec = FrameSpec::new(viewport, width, height, iterations, Complex::new(0.0, 0.0))?;

    let outfile = matches.value_of(OUTPUT).unwrap();
    let start = Instant::now();
    render_to_file(&spec, &palette, threads, outfile)?;
    info!(
        "rendered {}x{} at {} iterations to {} in {} ms",
        width,
        height,
        iterations,
        outfile,
        start.elapsed().as_millis()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
