//! CEDS combustion-sector vocabulary.
//!
//! Only rows in one of these sectors are eligible for outlier repair and
//! freezing; every other sector must leave the run bit-identical to its
//! input values.

pub const COMBUSTION_SECTORS: [&str; 27] = [
    "1A1a_Electricity-autoproducer",
    "1A1a_Electricity-public",
    "1A1a_Heat-production",
    "1A2a_Ind-Comb-Iron-steel",
    "1A2b_Ind-Comb-Non-ferrous-metals",
    "1A2c_Ind-Comb-Chemicals",
    "1A2d_Ind-Comb-Pulp-paper",
    "1A2e_Ind-Comb-Food-tobacco",
    "1A2f_Ind-Comb-Non-metalic-minerals",
    "1A2g_Ind-Comb-Construction",
    "1A2g_Ind-Comb-machinery",
    "1A2g_Ind-Comb-mining-quarying",
    "1A2g_Ind-Comb-other",
    "1A2g_Ind-Comb-textile-leather",
    "1A2g_Ind-Comb-transpequip",
    "1A2g_Ind-Comb-wood-products",
    "1A3ai_International-aviation",
    "1A3aii_Domestic-aviation",
    "1A3b_Road",
    "1A3c_Rail",
    "1A3di_International-shipping",
    "1A3dii_Domestic-navigation",
    "1A3eii_Other-transp",
    "1A4a_Commercial-institutional",
    "1A4b_Residential",
    "1A4c_Agriculture-forestry-fishing",
    "1A5_Other-unspecified",
];

pub fn is_combustion_sector(sector: &str) -> bool {
    COMBUSTION_SECTORS
        .iter()
        .any(|candidate| *candidate == sector)
}
