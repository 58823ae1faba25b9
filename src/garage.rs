use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Dataset, MaintenanceTask};
use crate::storage::{ImageUpload, JsonStore, UploadDir};

/// The dataset together with the files backing it.
///
/// Construct one per process and hand it to whatever presents the data.
/// Every mutating call re-reads the document, applies the change in memory
/// and rewrites the whole document. Calls that change nothing (unknown car,
/// duplicate name, index out of range) do not write.
#[derive(Debug)]
pub struct Garage {
    store: JsonStore,
    uploads: UploadDir,
    data: Dataset,
}

impl Garage {
    /// Opens the garage at the configured data directory.
    pub fn open(config: &Config) -> Result<Self> {
        Self::with_parts(
            JsonStore::new(config.data_file()),
            UploadDir::new(config.uploads_dir()),
        )
    }

    pub fn with_parts(store: JsonStore, uploads: UploadDir) -> Result<Self> {
        let mut garage = Self {
            store,
            uploads,
            data: Dataset::default(),
        };
        garage.reload()?;
        Ok(garage)
    }

    /// The dataset as last read or written.
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// Re-reads the dataset from disk, dropping the in-memory copy.
    pub fn reload(&mut self) -> Result<()> {
        let mut data = self.store.load()?;
        let numbered = data.assign_missing_ids();
        if numbered > 0 {
            warn!(numbered, "tasks without ids were numbered; saved on next change");
        }
        self.data = data;
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.data)
    }

    /// Registers a car, storing its image if one was supplied.
    ///
    /// Nothing happens, and no image is written, if the name is taken.
    pub fn add_car(
        &mut self,
        name: &str,
        model_year: &str,
        image: Option<&ImageUpload>,
    ) -> Result<bool> {
        self.reload()?;
        if self.data.has_car(name) {
            debug!(car = name, "car already registered");
            return Ok(false);
        }
        let image_path = self.store_image(image)?;
        let added = self.data.add_car(name, model_year, image_path);
        if added {
            self.persist()?;
        }
        Ok(added)
    }

    /// Updates a car's model year, replacing its image only if a new one was supplied.
    pub fn edit_car(
        &mut self,
        name: &str,
        model_year: &str,
        image: Option<&ImageUpload>,
    ) -> Result<bool> {
        self.reload()?;
        if !self.data.has_car(name) {
            debug!(car = name, "unknown car");
            return Ok(false);
        }
        let image_path = self.store_image(image)?;
        let edited = self.data.edit_car(name, model_year, image_path);
        if edited {
            self.persist()?;
        }
        Ok(edited)
    }

    /// Removes a car with all of its pending tasks and history.
    pub fn remove_car(&mut self, name: &str) -> Result<bool> {
        self.reload()?;
        let removed = self.data.remove_car(name);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Schedules a task for a registered car. Returns the new task's id.
    pub fn add_task(&mut self, car_name: &str, task: &str, due_date: &str) -> Result<Option<u64>> {
        self.reload()?;
        let id = self.data.add_task(car_name, task, due_date);
        if id.is_some() {
            self.persist()?;
        }
        Ok(id)
    }

    /// Completes the car's pending task at `index`, dated today.
    pub fn complete_task(
        &mut self,
        car_name: &str,
        index: usize,
        note: Option<&str>,
    ) -> Result<Option<MaintenanceTask>> {
        self.complete_task_on(car_name, index, note, today())
    }

    /// Same as [`Garage::complete_task`] with an explicit completion date.
    pub fn complete_task_on(
        &mut self,
        car_name: &str,
        index: usize,
        note: Option<&str>,
        date: NaiveDate,
    ) -> Result<Option<MaintenanceTask>> {
        self.reload()?;
        let done = self.data.complete_task(car_name, index, note, date).cloned();
        if done.is_some() {
            self.persist()?;
        }
        Ok(done)
    }

    /// Completes the pending task with the given id, dated today.
    ///
    /// Returns the car the task belonged to along with the completed task.
    pub fn complete_task_by_id(
        &mut self,
        id: u64,
        note: Option<&str>,
    ) -> Result<Option<(String, MaintenanceTask)>> {
        self.reload()?;
        let Some(car) = self.data.find_pending(id).map(|(car, _)| car.to_string()) else {
            debug!(id, "no pending task with this id");
            return Ok(None);
        };
        let done = self.data.complete_task_by_id(id, note, today()).cloned();
        if done.is_some() {
            self.persist()?;
        }
        Ok(done.map(|task| (car, task)))
    }

    fn store_image(&self, image: Option<&ImageUpload>) -> Result<Option<String>> {
        match image {
            Some(upload) if !upload.file_name.trim().is_empty() => self.uploads.store(upload),
            _ => Ok(None),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
