//! Station tracking for jobs moving across the workshop floor.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A workshop station. Every job visits all four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Station {
    #[serde(rename = "corte")]
    Cutting,
    #[serde(rename = "costura")]
    Sewing,
    #[serde(rename = "tapizado")]
    Upholstery,
    #[serde(rename = "embalaje")]
    Packing,
}

impl Station {
    pub const ALL: [Station; 4] = [
        Station::Cutting,
        Station::Sewing,
        Station::Upholstery,
        Station::Packing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Station::Cutting => "corte",
            Station::Sewing => "costura",
            Station::Upholstery => "tapizado",
            Station::Packing => "embalaje",
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a job stands at one station.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Illegal station transitions.
#[derive(Debug, Error, PartialEq)]
pub enum WorkshopError {
    #[error("station {0} is already completed")]
    AlreadyCompleted(Station),
    #[error("station {0} has not been started")]
    NotStarted(Station),
}

/// Timestamped record of a job's pass through one station.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationLog {
    pub station: Station,
    pub status: StationStatus,
    pub started_at: Option<NaiveDateTime>,
    pub finished_at: Option<NaiveDateTime>,
}

impl StationLog {
    pub fn new(station: Station) -> Self {
        Self {
            station,
            status: StationStatus::Pending,
            started_at: None,
            finished_at: None,
        }
    }

    /// Mark work started. Starting a completed station is an error.
    pub fn start(&mut self, at: NaiveDateTime) -> Result<(), WorkshopError> {
        if self.status == StationStatus::Completed {
            return Err(WorkshopError::AlreadyCompleted(self.station));
        }
        self.status = StationStatus::InProgress;
        self.started_at = Some(at);
        Ok(())
    }

    /// Mark work finished. Completing a never-started station is an error.
    pub fn finish(&mut self, at: NaiveDateTime) -> Result<(), WorkshopError> {
        if self.status == StationStatus::Pending {
            return Err(WorkshopError::NotStarted(self.station));
        }
        self.status = StationStatus::Completed;
        self.finished_at = Some(at);
        Ok(())
    }

    /// Wall time spent at the station, once both ends are recorded.
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(finish)) => Some(finish - start),
            _ => None,
        }
    }
}

/// One module line of the customer's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleLine {
    pub sku: String,
    pub description: String,
    pub quantity: u32,
}

/// The customer job a work order fulfills.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub client: String,
    pub modules: Vec<ModuleLine>,
}

/// A shop-floor work order with one log per station.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    pub job: Job,
    pub stations: BTreeMap<Station, StationLog>,
}

impl WorkOrder {
    /// New order with every station pending.
    pub fn new(id: impl Into<String>, job: Job) -> Self {
        let stations = Station::ALL
            .iter()
            .map(|&station| (station, StationLog::new(station)))
            .collect();
        Self {
            id: id.into(),
            job,
            stations,
        }
    }

    pub fn start_station(
        &mut self,
        station: Station,
        at: NaiveDateTime,
    ) -> Result<(), WorkshopError> {
        self.log_mut(station).start(at)
    }

    pub fn finish_station(
        &mut self,
        station: Station,
        at: NaiveDateTime,
    ) -> Result<(), WorkshopError> {
        self.log_mut(station).finish(at)
    }

    pub fn station_statuses(&self) -> BTreeMap<Station, StationStatus> {
        self.stations
            .iter()
            .map(|(&station, log)| (station, log.status))
            .collect()
    }

    pub fn elapsed_by_station(&self) -> BTreeMap<Station, Option<Duration>> {
        self.stations
            .iter()
            .map(|(&station, log)| (station, log.elapsed()))
            .collect()
    }

    /// All four stations completed.
    pub fn is_complete(&self) -> bool {
        self.stations
            .values()
            .all(|log| log.status == StationStatus::Completed)
    }

    fn log_mut(&mut self, station: Station) -> &mut StationLog {
        self.stations
            .entry(station)
            .or_insert_with(|| StationLog::new(station))
    }
}
