// Transfer car (CT) endpoints.
//
// The car's status lives in PLC data block DB112, exposed only through
// the database mirror. Both routes use the `{ success, ... }` envelope.

use tracing::debug;

use crate::client::StatusClient;
use crate::error::Error;
use crate::models::TransferCarStatusRow;

impl StatusClient {
    /// Latest transfer car status.
    ///
    /// `GET {mirror}/db112/read` -- wrapped as `{ success, data }`.
    pub async fn transfer_car_status(&self) -> Result<TransferCarStatusRow, Error> {
        let url = self.mirror_url("db112/read");
        debug!("fetching transfer car status");
        self.get_json(url).await
    }

    /// Trigger a transfer car refresh from the PLC.
    ///
    /// `POST {mirror}/db112/sync` -- acknowledged as `{ success }`.
    /// A `success: false` ack propagates as [`Error::Backend`]; sync
    /// failures are never masked.
    pub async fn transfer_car_sync(&self) -> Result<(), Error> {
        let url = self.mirror_url("db112/sync");
        debug!("requesting transfer car sync");
        self.post_ack(url).await
    }
}
