//! Built-in subset of the ISO 11783-11 data dictionary
//!
//! Covers the application rates, totals and states that appear in task
//! summaries and prescriptions. A full dictionary can be merged on top from a
//! DDI export file.

use super::QuantityDefinition;
use crate::constants::ddi;

/// Built-in definitions with their canonical representation codes
pub fn definitions() -> Vec<QuantityDefinition> {
    vec![
        QuantityDefinition::numeric(
            ddi::SETPOINT_VOLUME_PER_AREA_RATE,
            "Setpoint Volume Per Area Application Rate",
            "mm3m-2",
            0.01,
        )
        .with_representation("vrAppRateVolumeSetPoint"),
        QuantityDefinition::numeric(
            ddi::ACTUAL_VOLUME_PER_AREA_RATE,
            "Actual Volume Per Area Application Rate",
            "mm3m-2",
            0.01,
        )
        .with_representation("vrAppRateVolumeActual"),
        QuantityDefinition::numeric(
            ddi::SETPOINT_MASS_PER_AREA_RATE,
            "Setpoint Mass Per Area Application Rate",
            "mg1m-2",
            1.0,
        )
        .with_representation("vrAppRateMassSetPoint"),
        QuantityDefinition::numeric(
            ddi::ACTUAL_MASS_PER_AREA_RATE,
            "Actual Mass Per Area Application Rate",
            "mg1m-2",
            1.0,
        )
        .with_representation("vrAppRateMassActual"),
        QuantityDefinition::numeric(ddi::ACTUAL_WORKING_WIDTH, "Actual Working Width", "mm", 1.0)
            .with_representation("vrEquipmentWidth"),
        QuantityDefinition::numeric(ddi::TOTAL_VOLUME, "Total Volume", "l", 1.0)
            .with_representation("vrTotalVolumeApplied"),
        QuantityDefinition::numeric(ddi::TOTAL_MASS, "Total Mass", "kg", 1.0)
            .with_representation("vrTotalMassApplied"),
        QuantityDefinition::numeric(ddi::TOTAL_AREA, "Total Area", "m2", 1.0)
            .with_representation("vrTotalAreaCovered"),
        QuantityDefinition::numeric(
            ddi::EFFECTIVE_TOTAL_DISTANCE,
            "Effective Total Distance",
            "mm",
            1.0,
        )
        .with_representation("vrDistanceTraveled"),
        QuantityDefinition::numeric(
            ddi::INEFFECTIVE_TOTAL_DISTANCE,
            "Ineffective Total Distance",
            "mm",
            1.0,
        )
        .with_representation("vrIneffectiveDistanceTraveled"),
        QuantityDefinition::numeric(ddi::EFFECTIVE_TOTAL_TIME, "Effective Total Time", "s", 1.0)
            .with_representation("vrEffectiveOperatingTime"),
        QuantityDefinition::numeric(
            ddi::INEFFECTIVE_TOTAL_TIME,
            "Ineffective Total Time",
            "s",
            1.0,
        )
        .with_representation("vrIneffectiveOperatingTime"),
        QuantityDefinition::enumerated(ddi::ACTUAL_WORK_STATE, "Actual Work State")
            .with_representation("dtRecordingStatus"),
        QuantityDefinition::numeric(
            ddi::TOTAL_FUEL_CONSUMPTION,
            "Total Fuel Consumption",
            "ml",
            1.0,
        )
        .with_representation("vrFuelConsumed"),
    ]
}
