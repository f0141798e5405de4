use hexlib::{
    GridMode, HexMap, HexOrientation, MapConfig, MapShape, OverlayConfig,
};
use validator::ValidationErrors;

/// Build a map from the config and get the names of all the fields that
/// failed validation, sorted
fn error_fields(config: MapConfig) -> Vec<String> {
    let err = HexMap::new(config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .map(|field| field.to_string())
        .collect::<Vec<_>>();
    error_fields.sort_unstable();
    error_fields
}

#[test]
fn test_config_validation() {
    let config = MapConfig {
        hex_size: 0.0,                             // invalid
        orientation: HexOrientation::Flat,         // valid
        grid_mode: GridMode::Landscape,            // valid
        shape: MapShape::Hexagonal { radius: -1 }, // invalid
        overlay: OverlayConfig {
            texture_width: 0,                   // invalid
            texture_height: 4096,               // valid
            landscape_half_length: Some(-10.0), // invalid
        },
    };

    // This is a bit of a lazy check but it works well enough
    assert_eq!(
        error_fields(config),
        vec!["hex_size", "overlay", "shape"],
        "incorrect validation errors for {:#?}",
        config
    );
}

#[test]
fn test_rectangular_validation() {
    let config = MapConfig {
        shape: MapShape::Rectangular {
            half_width: 0,
            half_height: 3,
        },
        ..Default::default()
    };
    assert_eq!(error_fields(config), vec!["shape"]);

    let config = MapConfig {
        shape: MapShape::Rectangular {
            half_width: 1,
            half_height: 1,
        },
        ..Default::default()
    };
    assert!(HexMap::new(config).is_ok());
}

#[test]
fn test_default_config_is_valid() {
    let map = HexMap::new(MapConfig::default()).unwrap();
    assert_eq!(map.config(), &MapConfig::default());
}
