//! Built-in projector table.

use super::{BrandCatalog, LensSpec, ProjectorSpec, Resolution};

const fn lens(
    id: &'static str,
    name: &'static str,
    throw_ratio: &'static str,
    zoom_range: &'static str,
) -> LensSpec {
    LensSpec {
        id,
        name,
        throw_ratio,
        zoom_range,
    }
}

const UHD_4K: Resolution = Resolution { width: 4096, height: 2160 };
const WUXGA: Resolution = Resolution { width: 1920, height: 1200 };
const FULL_HD: Resolution = Resolution { width: 1920, height: 1080 };

pub(super) const BRANDS: &[BrandCatalog] = &[
    BrandCatalog {
        id: "barco",
        name: "Barco",
        projectors: &[
            ProjectorSpec {
                id: "barco-uhd",
                name: "UDX-4K32",
                resolution: UHD_4K,
                lumens: 31_000,
                lenses: &[
                    lens("tld-0.38", "TLD+ 0.38:1", "0.38:1", "Fixed"),
                    lens("tld-0.75-1.16", "TLD+ 0.75-1.16:1", "0.75-1.16:1", "1.55x"),
                    lens("tld-1.16-1.49", "TLD+ 1.16-1.49:1", "1.16-1.49:1", "1.28x"),
                ],
            },
            ProjectorSpec {
                id: "barco-wuxga",
                name: "HDX-W20",
                resolution: WUXGA,
                lumens: 20_000,
                lenses: &[
                    lens("tld-0.73-0.95", "TLD 0.73-0.95:1", "0.73-0.95:1", "1.3x"),
                    lens("tld-1.45-2.17", "TLD 1.45-2.17:1", "1.45-2.17:1", "1.5x"),
                ],
            },
        ],
    },
    BrandCatalog {
        id: "christie",
        name: "Christie",
        projectors: &[
            ProjectorSpec {
                id: "christie-4k",
                name: "Boxer 4K30",
                resolution: UHD_4K,
                lumens: 30_000,
                lenses: &[
                    lens("chr-0.67-0.9", "Wide 0.67-0.9:1", "0.67-0.9:1", "1.34x"),
                    lens("chr-0.9-1.16", "Short 0.9-1.16:1", "0.9-1.16:1", "1.29x"),
                    lens("chr-1.16-1.49", "Medium 1.16-1.49:1", "1.16-1.49:1", "1.28x"),
                ],
            },
            ProjectorSpec {
                id: "christie-hd",
                name: "D20HD-HS",
                resolution: FULL_HD,
                lumens: 20_000,
                lenses: &[
                    lens("chr-0.73-0.89", "Wide 0.73-0.89:1", "0.73-0.89:1", "1.22x"),
                    lens("chr-1.5-2.0", "Standard 1.5-2.0:1", "1.5-2.0:1", "1.33x"),
                ],
            },
        ],
    },
    BrandCatalog {
        id: "panasonic",
        name: "Panasonic",
        projectors: &[ProjectorSpec {
            id: "pana-4k",
            name: "PT-RQ35K",
            resolution: UHD_4K,
            lumens: 35_000,
            lenses: &[
                lens("pan-0.8-1.0", "ET-DLE055 0.8-1.0:1", "0.8-1.0:1", "1.25x"),
                lens("pan-1.0-1.3", "ET-DLE150 1.0-1.3:1", "1.0-1.3:1", "1.3x"),
                lens("pan-1.3-1.8", "ET-DLE250 1.3-1.8:1", "1.3-1.8:1", "1.38x"),
            ],
        }],
    },
    BrandCatalog {
        id: "epson",
        name: "Epson",
        projectors: &[ProjectorSpec {
            id: "epson-pro",
            name: "EB-PU1007B",
            resolution: WUXGA,
            lumens: 7_000,
            lenses: &[
                lens("eps-0.35", "ELPLX02 0.35:1", "0.35:1", "Fixed"),
                lens("eps-1.44-2.32", "ELPLU03 1.44-2.32:1", "1.44-2.32:1", "1.61x"),
            ],
        }],
    },
];
