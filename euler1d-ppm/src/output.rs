use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::Path;

use ndarray::Array1;
use lib_euler1d::Primitive;




// ============================================================================
/**
 * Write one line per zone: the cell center followed by the density,
 * velocity, and pressure.
 */
pub fn write_ascii<P: AsRef<Path>>(path: P, cell_centers: &Array1<f64>, primitive: &Array1<Primitive>) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut file = LineWriter::new(file);

    writeln!(file, "# x density velocity pressure")?;

    for (x, p) in cell_centers.iter().zip(primitive) {
        writeln!(file, "{:+.12e} {:+.12e} {:+.12e} {:+.12e}", x, p.density, p.velocity, p.pressure)?;
    }
    file.flush()
}




// ============================================================================
#[cfg(feature = "hdf5")]
pub fn write_hdf5<P: AsRef<Path>>(path: P, cell_centers: &Array1<f64>, primitive: &Array1<Primitive>, time: f64) -> Result<(), hdf5::Error> {
    use hdf5::types::VarLenAscii;
    use lib_hydro_algorithms::IntoAndFromF64Array3;

    // hdf5 links its own ndarray, so hand it plain slices
    let file = hdf5::File::create(path)?;
    let data: Vec<[f64; 3]> = primitive.iter().map(|p| p.into_f64_array3()).collect();
    let x: Vec<f64> = cell_centers.to_vec();
    let format = VarLenAscii::from_ascii("euler1d").map_err(|e| hdf5::Error::from(e.to_string()))?;

    file.new_dataset::<[f64; 3]>().shape(data.len()).create("primitive")?.write_raw(&data)?;
    file.new_dataset::<f64>().shape(x.len()).create("cell_centers")?.write_raw(&x)?;
    file.new_dataset::<f64>().shape(()).create("time")?.write_scalar(&time)?;
    file.new_dataset::<VarLenAscii>().shape(()).create("format")?.write_scalar(&format)?;

    Ok(())
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_output_has_one_row_per_zone() {
        let path = std::env::temp_dir().join(format!("euler1d-ppm-output-{}.dat", std::process::id()));
        let x = Array1::from(vec![0.25, 0.75]);
        let p = Array1::from(vec![Primitive::new(1.0, 0.0, 1.0), Primitive::new(0.125, 0.5, 0.1)]);

        write_ascii(&path, &x, &p).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let rows: Vec<Vec<f64>> = text
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.split_whitespace().map(|v| v.parse().unwrap()).collect())
            .collect();

        assert_eq!(rows, vec![vec![0.25, 1.0, 0.0, 1.0], vec![0.75, 0.125, 0.5, 0.1]]);
    }

    #[cfg(feature = "hdf5")]
    #[test]
    fn hdf5_output_reads_back() {
        let path = std::env::temp_dir().join(format!("euler1d-ppm-output-{}.h5", std::process::id()));
        let x = Array1::from(vec![0.25, 0.75]);
        let p = Array1::from(vec![Primitive::new(1.0, 0.0, 1.0), Primitive::new(0.125, 0.5, 0.1)]);

        write_hdf5(&path, &x, &p, 0.2).unwrap();
        let file = hdf5::File::open(&path).unwrap();
        let cell_centers = file.dataset("cell_centers").unwrap().read_raw::<f64>().unwrap();
        let primitive = file.dataset("primitive").unwrap().read_raw::<[f64; 3]>().unwrap();
        let time = file.dataset("time").unwrap().read_scalar::<f64>().unwrap();
        drop(file);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(cell_centers, vec![0.25, 0.75]);
        assert_eq!(primitive, vec![[1.0, 0.0, 1.0], [0.125, 0.5, 0.1]]);
        assert_eq!(time, 0.2);
    }
}
