use rgol::catalog;
use rgol::grid::Grid;
use rgol::rle;

#[test]
fn test_catalog_patterns_place() -> anyhow::Result<()> {
    let mut tested = 0;
    let mut failed = Vec::new();

    for (name, text) in catalog::PATTERNS {
        let res = rle::decode(text)
            .map_err(anyhow::Error::from)
            .and_then(|pattern| Ok(Grid::from_pattern(&pattern, 64, 64)?));

        match res {
            Ok(_) => tested += 1,
            Err(e) => failed.push((name, e)),
        }
    }

    if !failed.is_empty() {
        for (name, err) in &failed {
            eprintln!("Failed to place {name}: {err:#}");
        }

        panic!(
            "{}/{} catalog patterns failed",
            failed.len(),
            tested + failed.len()
        );
    }

    println!("Successfully placed {tested} catalog patterns");

    Ok(())
}

#[test]
fn test_catalog_dimensions() -> anyhow::Result<()> {
    let glider = rle::decode(catalog::GLIDER)?;
    assert_eq!((glider.height(), glider.width()), (3, 3));

    let pulsar = rle::decode(catalog::PULSAR)?;
    assert_eq!((pulsar.height(), pulsar.width()), (13, 13));

    let gun = rle::decode(catalog::GOSPER_GLIDER_GUN)?;
    assert_eq!((gun.height(), gun.width()), (9, 36));

    Ok(())
}
