//! Feature stage construction for the census schema.
//!
//! Derives the per-column selection masks and stage specs from the
//! schema taxonomy: one single-column categorical stage per categorical
//! column, then one stage covering all numeric columns.

use hobart::schema::census::FEATURE_COUNT;
use hobart::{CensusColumn, ColumnKind};
use hobart_data::frame::ColumnSpec;
use hobart_features::{FeatureError, SelectionMask, StageSpec};

/// Column layout of the raw census file, in file order.
pub(crate) fn census_column_specs() -> Vec<ColumnSpec> {
    CensusColumn::all()
        .into_iter()
        .map(|column| match column.kind() {
            ColumnKind::Numeric => ColumnSpec::numeric(column.name()),
            ColumnKind::Categorical | ColumnKind::Label => ColumnSpec::text(column.name()),
        })
        .collect()
}

/// Stage specs for the census feature union.
///
/// Categorical stages are named after the column index they select, so
/// `workclass` (column 1) becomes stage `categorical-1`. The final
/// `numerical` stage passes the six numeric columns through unencoded.
pub(crate) fn build_stage_specs() -> Result<Vec<StageSpec>, FeatureError> {
    let categorical = CensusColumn::categorical_columns();
    let mut specs = Vec::with_capacity(categorical.len() + 1);
    for column in categorical {
        specs.push(StageSpec::Categorical {
            name: format!("categorical-{}", column.index()),
            mask: SelectionMask::single(column.index(), FEATURE_COUNT)?,
        });
    }

    let scores: Vec<f64> = CensusColumn::feature_columns()
        .iter()
        .map(|column| {
            if column.kind() == ColumnKind::Numeric {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    specs.push(StageSpec::Numeric {
        name: "numerical".to_string(),
        mask: SelectionMask::new(scores, CensusColumn::numeric_columns().len())?,
    });
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_stage_per_categorical_column_plus_numeric() {
        let specs = build_stage_specs().unwrap();
        assert_eq!(specs.len(), 9);
        assert!(matches!(
            specs.last(),
            Some(StageSpec::Numeric { name, .. }) if name == "numerical"
        ));
    }

    #[test]
    fn test_categorical_stage_names_carry_column_indices() {
        let specs = build_stage_specs().unwrap();
        let names: Vec<&str> = specs
            .iter()
            .filter_map(|spec| match spec {
                StageSpec::Categorical { name, .. } => Some(name.as_str()),
                StageSpec::Numeric { .. } => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "categorical-1",
                "categorical-3",
                "categorical-5",
                "categorical-6",
                "categorical-7",
                "categorical-8",
                "categorical-9",
                "categorical-13",
            ]
        );
    }

    #[test]
    fn test_categorical_masks_select_one_column_each() {
        let specs = build_stage_specs().unwrap();
        for spec in &specs {
            if let StageSpec::Categorical { mask, .. } = spec {
                assert_eq!(mask.width(), FEATURE_COUNT);
                assert_eq!(mask.selected_count(), 1);
            }
        }
    }

    #[test]
    fn test_numeric_mask_selects_the_six_numeric_columns() {
        let specs = build_stage_specs().unwrap();
        let Some(StageSpec::Numeric { mask, .. }) = specs.last() else {
            panic!("last stage must be numeric");
        };
        assert_eq!(mask.width(), FEATURE_COUNT);
        assert_eq!(mask.selected_indices(), vec![0, 2, 4, 10, 11, 12]);
    }

    #[test]
    fn test_column_specs_cover_the_file_layout() {
        let specs = census_column_specs();
        assert_eq!(specs.len(), 15);
        assert_eq!(specs[0], ColumnSpec::numeric("age"));
        assert_eq!(specs[1], ColumnSpec::text("workclass"));
        assert_eq!(specs[14], ColumnSpec::text("income-level"));
        assert_eq!(specs.iter().filter(|spec| spec.numeric).count(), 6);
    }
}
