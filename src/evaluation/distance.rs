// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Metric schema and parser for `pc_error` output

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distance formulation reported by `pc_error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceKind {
    PointToPoint,
    PointToPlane,
}

/// Metrics scraped from `pc_error -d`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DistanceMetric {
    Acd1P2Point,
    Acd2P2Point,
    CdP2Point,
    CdPsnrP2Point,
    HausdorffP2Point,
    Acd1P2Plane,
    Acd2P2Plane,
    CdP2Plane,
    CdPsnrP2Plane,
    HausdorffP2Plane,
}

impl DistanceMetric {
    /// Report order: point-to-point block, then point-to-plane block
    pub const ALL: [DistanceMetric; 10] = [
        DistanceMetric::Acd1P2Point,
        DistanceMetric::Acd2P2Point,
        DistanceMetric::CdP2Point,
        DistanceMetric::CdPsnrP2Point,
        DistanceMetric::HausdorffP2Point,
        DistanceMetric::Acd1P2Plane,
        DistanceMetric::Acd2P2Plane,
        DistanceMetric::CdP2Plane,
        DistanceMetric::CdPsnrP2Plane,
        DistanceMetric::HausdorffP2Plane,
    ];

    /// Prefix that precedes the value on a `pc_error` output line
    pub fn label(&self) -> &'static str {
        match self {
            DistanceMetric::Acd1P2Point => "A->B,ACD1,p2point,",
            DistanceMetric::Acd2P2Point => "B->A,ACD2,p2point,",
            DistanceMetric::CdP2Point => "Symmetric,CD,p2point,",
            DistanceMetric::CdPsnrP2Point => "Symmetric,CD-PSNR,p2point,",
            DistanceMetric::HausdorffP2Point => "Symmetric,hF,p2point,",
            DistanceMetric::Acd1P2Plane => "A->B,ACD1,p2plane,",
            DistanceMetric::Acd2P2Plane => "B->A,ACD2,p2plane,",
            DistanceMetric::CdP2Plane => "Symmetric,CD,p2plane,",
            DistanceMetric::CdPsnrP2Plane => "Symmetric,CD-PSNR,p2plane,",
            DistanceMetric::HausdorffP2Plane => "Symmetric,hF,p2plane,",
        }
    }

    /// Left-hand column of the log line, padded to a common width
    pub fn report_name(&self) -> &'static str {
        match self {
            DistanceMetric::Acd1P2Point => "Asym. Chamfer dist. (1->2) p2pt",
            DistanceMetric::Acd2P2Point => "Asym. Chamfer dist. (2->1) p2pt",
            DistanceMetric::CdP2Point => "Chamfer dist.              p2pt",
            DistanceMetric::CdPsnrP2Point => "CD-PSNR                    p2pt",
            DistanceMetric::HausdorffP2Point => "Hausdorff distance         p2pt",
            DistanceMetric::Acd1P2Plane => "Asym. Chamfer dist. (1->2) p2pl",
            DistanceMetric::Acd2P2Plane => "Asym. Chamfer dist. (2->1) p2pl",
            DistanceMetric::CdP2Plane => "Chamfer dist.              p2pl",
            DistanceMetric::CdPsnrP2Plane => "CD-PSNR                    p2pl",
            DistanceMetric::HausdorffP2Plane => "Hausdorff distance         p2pl",
        }
    }

    pub fn kind(&self) -> DistanceKind {
        match self {
            DistanceMetric::Acd1P2Point
            | DistanceMetric::Acd2P2Point
            | DistanceMetric::CdP2Point
            | DistanceMetric::CdPsnrP2Point
            | DistanceMetric::HausdorffP2Point => DistanceKind::PointToPoint,
            _ => DistanceKind::PointToPlane,
        }
    }
}

/// Every metric of [`DistanceMetric::ALL`], as the verbatim text `pc_error` printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceReport {
    values: BTreeMap<DistanceMetric, String>,
}

impl DistanceReport {
    /// Extract all metrics from the tool's stdout in a single pass.
    ///
    /// A label may sit anywhere on a line; the value is the rest of that line.
    /// When a label repeats, the last line wins. Fails with
    /// [`EvalError::MissingMetrics`] naming every label that never appeared.
    pub fn parse(output: &str) -> Result<Self> {
        let mut values = BTreeMap::new();

        for line in output.lines() {
            for metric in DistanceMetric::ALL {
                if let Some(start) = line.find(metric.label()) {
                    let value = &line[start + metric.label().len()..];
                    values.insert(metric, value.to_string());
                }
            }
        }

        let missing: Vec<&'static str> = DistanceMetric::ALL
            .iter()
            .filter(|metric| !values.contains_key(metric))
            .map(|metric| metric.label())
            .collect();

        if !missing.is_empty() {
            return Err(EvalError::MissingMetrics(missing));
        }

        Ok(Self { values })
    }

    pub fn get(&self, metric: DistanceMetric) -> &str {
        // parse() guarantees every metric is present
        self.values.get(&metric).map(String::as_str).unwrap_or_default()
    }

    /// Metrics of one formulation, in report order
    pub fn of_kind(&self, kind: DistanceKind) -> impl Iterator<Item = (DistanceMetric, &str)> {
        DistanceMetric::ALL
            .into_iter()
            .filter(move |metric| metric.kind() == kind)
            .map(move |metric| (metric, self.get(metric)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DistanceMetric, &str)> {
        DistanceMetric::ALL
            .into_iter()
            .map(move |metric| (metric, self.get(metric)))
    }
}
