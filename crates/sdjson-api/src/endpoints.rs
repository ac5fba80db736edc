//! `SchedulesDirectApi` implementation for `SdClient`.

use std::collections::HashMap;

use tracing::instrument;

use crate::api::LocalSchedulesDirectApi;
use crate::client::{ApiRequest, SdClient, decode_json};
use crate::error::Result;
use crate::types::{
    Artwork, ArtworkResponse, AvailableDvbs, BaseResponse, ChangeLineupResponse, ChannelResponse,
    Country, Headend, LanguageCrossReference, LastModifiedEntry, LineupResponse, ProgramDescription,
    ProgramInfo, Schedule, Service, StationPreview, StationScheduleRequest, StatusResponse,
    StillRunningResponse, VersionResponse,
};

impl SdClient {
    /// Sends a request and decodes the JSON reply.
    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        request: &ApiRequest,
        what: &str,
    ) -> Result<T> {
        let body = self.send(request).await?;
        decode_json(&body, what)
    }
}

impl LocalSchedulesDirectApi for SdClient {
    #[instrument(skip_all)]
    async fn get_status(&self) -> Result<StatusResponse> {
        self.fetch_json(&ApiRequest::get("status"), "status").await
    }

    #[instrument(skip_all)]
    async fn get_version(&self, client_name: &str) -> Result<VersionResponse> {
        let request = ApiRequest::get(format!("version/{client_name}")).unauthenticated();
        self.fetch_json(&request, "version").await
    }

    #[instrument(skip_all)]
    async fn delete_message(&self, message_id: &str) -> Result<BaseResponse> {
        let request = ApiRequest::delete(format!("messages/{message_id}"));
        self.fetch_json(&request, "message deletion").await
    }

    #[instrument(skip_all)]
    async fn get_lineups(&self) -> Result<LineupResponse> {
        self.fetch_json(&ApiRequest::get("lineups"), "lineups").await
    }

    #[instrument(skip_all)]
    async fn add_lineup(&self, lineup_id: &str) -> Result<ChangeLineupResponse> {
        let request = ApiRequest::put(format!("lineups/{lineup_id}"));
        self.fetch_json(&request, "lineup change").await
    }

    #[instrument(skip_all)]
    async fn delete_lineup(&self, lineup_id: &str) -> Result<ChangeLineupResponse> {
        let request = ApiRequest::delete(format!("lineups/{lineup_id}"));
        self.fetch_json(&request, "lineup change").await
    }

    #[instrument(skip_all)]
    async fn preview_lineup(&self, lineup_id: &str) -> Result<Vec<StationPreview>> {
        let request = ApiRequest::get(format!("lineups/preview/{lineup_id}"));
        self.fetch_json(&request, "lineup preview").await
    }

    #[instrument(skip_all)]
    async fn get_channels(&self, lineup_id: &str, verbose: bool) -> Result<ChannelResponse> {
        let mut request = ApiRequest::get(format!("lineups/{lineup_id}"));
        if verbose {
            request = request.header("verboseMap", "true");
        }
        self.fetch_json(&request, "channel map").await
    }

    #[instrument(skip_all)]
    async fn get_headends(&self, country: &str, postal_code: &str) -> Result<Vec<Headend>> {
        let request = ApiRequest::get("headends")
            .query("country", country)
            .query("postalcode", postal_code);
        self.fetch_json(&request, "headends").await
    }

    #[instrument(skip_all)]
    async fn automap_lineup(&self, scan: &[u8]) -> Result<HashMap<String, i64>> {
        let request = ApiRequest::post("map/lineup").body(scan.to_vec());
        self.fetch_json(&request, "automap result").await
    }

    #[instrument(skip_all)]
    async fn submit_lineup(&self, scan: &[u8], lineup_id: &str) -> Result<()> {
        let request = ApiRequest::post(format!("map/lineup/{lineup_id}")).body(scan.to_vec());
        self.send(&request).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn get_schedules(&self, requests: &[StationScheduleRequest]) -> Result<Vec<Schedule>> {
        tracing::debug!(stations = requests.len(), "Requesting schedules");
        let request = ApiRequest::post("schedules").json(requests)?;
        let body = self.send(&request).await?;
        decode_json(&body, "schedules")
    }

    #[instrument(skip_all)]
    async fn get_last_modified(
        &self,
        requests: &[StationScheduleRequest],
    ) -> Result<HashMap<String, HashMap<String, LastModifiedEntry>>> {
        let request = ApiRequest::post("schedules/md5").json(requests)?;
        self.fetch_json(&request, "schedule MD5s").await
    }

    #[instrument(skip_all)]
    async fn get_program_info(&self, program_ids: &[String]) -> Result<Vec<ProgramInfo>> {
        let template = ApiRequest::post("programs").header("Accept-Encoding", "deflate,gzip");
        self.post_id_batches(&template, program_ids, self.batch_limits().program_info)
            .await
    }

    #[instrument(skip_all)]
    async fn get_program_descriptions(
        &self,
        program_ids: &[String],
    ) -> Result<HashMap<String, ProgramDescription>> {
        let template = ApiRequest::post("metadata/description");
        self.post_id_batches(&template, program_ids, self.batch_limits().metadata)
            .await
    }

    #[instrument(skip_all)]
    async fn get_language_cross_reference(
        &self,
        program_ids: &[String],
    ) -> Result<HashMap<String, Vec<LanguageCrossReference>>> {
        let template = ApiRequest::post("xref");
        self.post_id_batches(&template, program_ids, self.batch_limits().metadata)
            .await
    }

    #[instrument(skip_all)]
    async fn get_program_still_running(&self, program_id: &str) -> Result<StillRunningResponse> {
        let request = ApiRequest::get(format!("metadata/stillRunning/{program_id}"));
        self.fetch_json(&request, "still-running result").await
    }

    #[instrument(skip_all)]
    async fn get_artwork_for_program_ids(
        &self,
        program_ids: &[String],
    ) -> Result<Vec<ArtworkResponse>> {
        let template = ApiRequest::post("metadata/programs").unauthenticated();
        self.post_id_batches(&template, program_ids, self.batch_limits().metadata)
            .await
    }

    #[instrument(skip_all)]
    async fn get_artwork_for_root_id(&self, root_id: &str) -> Result<Vec<Artwork>> {
        let request = ApiRequest::get(format!("metadata/programs/{root_id}")).unauthenticated();
        self.fetch_json(&request, "artwork").await
    }

    #[instrument(skip_all)]
    async fn get_celebrity_artwork(&self, celebrity_id: &str) -> Result<Vec<Artwork>> {
        let request =
            ApiRequest::get(format!("metadata/celebrity/{celebrity_id}")).unauthenticated();
        self.fetch_json(&request, "celebrity artwork").await
    }

    #[instrument(skip_all)]
    async fn get_image(&self, uri: &str) -> Result<Vec<u8>> {
        let path = if uri.starts_with("https://") || uri.starts_with("http://") {
            String::from(uri)
        } else {
            format!("image/{uri}")
        };
        self.send(&ApiRequest::get(path)).await
    }

    #[instrument(skip_all)]
    async fn get_available_services(&self) -> Result<Vec<Service>> {
        let request = ApiRequest::get("available").unauthenticated();
        self.fetch_json(&request, "available services").await
    }

    #[instrument(skip_all)]
    async fn get_available_countries(&self) -> Result<HashMap<String, Vec<Country>>> {
        let request = ApiRequest::get("available/countries").unauthenticated();
        self.fetch_json(&request, "available countries").await
    }

    #[instrument(skip_all)]
    async fn get_available_languages(&self) -> Result<HashMap<String, String>> {
        let request = ApiRequest::get("available/languages").unauthenticated();
        self.fetch_json(&request, "available languages").await
    }

    #[instrument(skip_all)]
    async fn get_available_dvbs(&self) -> Result<Vec<AvailableDvbs>> {
        let request = ApiRequest::get("available/dvb-s").unauthenticated();
        self.fetch_json(&request, "available satellites").await
    }

    #[instrument(skip_all)]
    async fn get_available_transmitters(&self, country: &str) -> Result<HashMap<String, String>> {
        let request = ApiRequest::get(format!("available/transmitters/{country}")).unauthenticated();
        self.fetch_json(&request, "available transmitters").await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use wiremock::matchers::{body_json, header, header_exists, header_regex, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    use super::*;
    use crate::client::BatchLimits;
    use crate::error::Error;
    use crate::error_code::ErrorCode;
    use crate::test_support::{connect, mount_token, test_builder};

    /// Echoes one artwork entry per requested program ID and records the
    /// batch sizes. Fails the batch numbered `fail_on` (1-based) if set.
    struct ArtworkEcho {
        sizes: Arc<Mutex<Vec<usize>>>,
        calls: AtomicUsize,
        fail_on: Option<usize>,
    }

    impl Respond for ArtworkEcho {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let call = self.calls.fetch_add(1, Ordering::SeqCst).saturating_add(1);
            let ids: Vec<String> = serde_json::from_slice(&request.body).unwrap();
            self.sizes.lock().unwrap().push(ids.len());
            if self.fail_on == Some(call) {
                return ResponseTemplate::new(200).set_body_string(
                    r#"{"response":"IMAGE_NOT_FOUND","code":5000,"serverID":"test","message":"Could not find requested image."}"#,
                );
            }
            let entries: Vec<serde_json::Value> = ids
                .iter()
                .map(|id| serde_json::json!({"programID": id, "data": []}))
                .collect();
            ResponseTemplate::new(200).set_body_json(entries)
        }
    }

    fn program_ids(count: usize) -> Vec<String> {
        (0..count).map(|n| format!("EP{n:012}")).collect()
    }

    #[tokio::test]
    async fn test_get_status() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("GET"))
            .and(path("/20141201/status"))
            .and(header("token", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"account":{"expires":"2025-01-01T00:00:00Z","maxLineups":4},"lineups":[{"lineup":"USA-NY67791-X","modified":"2024-05-01T00:00:00Z","uri":"/20141201/lineups/USA-NY67791-X"}],"systemStatus":[{"status":"Online","details":"All servers running normally."}],"code":0,"serverID":"test"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let status = client.get_status().await.unwrap();

        // Assert
        assert_eq!(status.account.unwrap().max_lineups, 4);
        assert_eq!(status.lineups[0].lineup, "USA-NY67791-X");
        assert_eq!(status.system_status[0].status, "Online");
    }

    #[tokio::test]
    async fn test_get_version_does_not_need_token() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/20141201/version/sdjson"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"client":"sdjson","version":"0.1.0","code":0,"serverID":"test"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_builder(&server).build().unwrap();

        // Act
        let version = client.get_version("sdjson").await.unwrap();

        // Assert
        assert_eq!(version.version, "0.1.0");
        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("token").is_none());
    }

    #[tokio::test]
    async fn test_get_headends_sends_query() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("GET"))
            .and(path("/20141201/headends"))
            .and(query_param("country", "USA"))
            .and(query_param("postalcode", "10001"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"headend":"NY67791","transport":"Cable","location":"New York","lineups":[{"name":"Cablevision","lineup":"USA-NY67791-X","uri":"/20141201/lineups/USA-NY67791-X"}]}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let headends = client.get_headends("USA", "10001").await.unwrap();

        // Assert
        assert_eq!(headends.len(), 1);
        assert_eq!(headends[0].lineups[0].lineup, "USA-NY67791-X");
    }

    #[tokio::test]
    async fn test_error_envelope_where_array_expected_is_service_error() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("GET"))
            .and(path("/20141201/headends"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"response":"INVALID_PARAMETER:POSTALCODE","code":2051,"serverID":"test","message":"The POSTALCODE parameter must be valid."}"#,
            ))
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let result = client.get_headends("USA", "ABCDE").await;

        // Assert
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Service(_)));
        assert_eq!(err.service_code().unwrap().wire(), "INVALID_PARAMETER:POSTALCODE");
    }

    #[tokio::test]
    async fn test_add_lineup_uses_put() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("PUT"))
            .and(path("/20141201/lineups/USA-NY67791-X"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"response":"OK","code":0,"serverID":"test","message":"Added lineup.","changesRemaining":"5"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let change = client.add_lineup("USA-NY67791-X").await.unwrap();

        // Assert
        assert_eq!(change.changes_remaining.get(), 5);
        assert_eq!(change.base.message, "Added lineup.");
    }

    #[tokio::test]
    async fn test_delete_lineup_uses_delete() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("DELETE"))
            .and(path("/20141201/lineups/USA-NY67791-X"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"code":0,"changesRemaining":4}"#),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let change = client.delete_lineup("USA-NY67791-X").await.unwrap();

        // Assert
        assert_eq!(change.changes_remaining.get(), 4);
    }

    #[tokio::test]
    async fn test_get_channels_verbose_header() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("GET"))
            .and(path("/20141201/lineups/USA-NY67791-X"))
            .and(header("verboseMap", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"map":[{"stationID":"20454","channel":"002"}],"stations":[{"stationID":"20454","callsign":"WCBS","name":"WCBS"}],"metadata":{"lineup":"USA-NY67791-X","modified":"2024-05-01T00:00:00Z","transport":"Cable"}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let channels = client.get_channels("USA-NY67791-X", true).await.unwrap();

        // Assert
        assert_eq!(channels.map[0].station_id, "20454");
        assert_eq!(channels.stations[0].call_sign, "WCBS");
        assert_eq!(channels.metadata.unwrap().transport, "Cable");
    }

    #[tokio::test]
    async fn test_get_schedules_decodes_array_reply() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("POST"))
            .and(path("/20141201/schedules"))
            .and(body_json(serde_json::json!([
                {"stationID": "10001", "date": ["2014-07-30"]},
                {"stationID": "10002"},
            ])))
            .respond_with(ResponseTemplate::new(200).set_body_string(concat!(
                r#"[{"metadata": {"endDate": "2014-08-12","startDate": "2014-07-30"},"programs": [{"airDateTime": "2014-07-30T00:30:00Z","audioProperties": ["ap1","ap2"],"contentRating": [{"body": "body1","code": "code1"}],"duration": 1800,"md5": "exubfjxJmKcSe52dVLj83g","new": true,"programID": "program1","syndication": {"source": "ss1","type": "st1"}},{"airDateTime": "2014-08-12T23:30:00Z","audioProperties": ["ap3","ap4","ap5"],"contentAdvisory": {"rating1": ["stuff1","stuff2"]},"duration": 1800,"md5": "5BxxvnI4Nv9ZuT9oQvOpQA","programID": "program2"}],"stationID": "10001"},"#,
                "\n",
                r#"{"metadata": {"endDate": "2014-08-12","startDate": "2014-07-30"},"programs": [{"airDateTime": "2014-07-30T00:30:00Z","duration": 1800,"md5": "exubfjxJmKcSe52dVLj83g","new": true,"programID": "program3"}],"stationID": "10002"}]"#,
            )))
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;
        let requests = [
            StationScheduleRequest {
                station_id: String::from("10001"),
                dates: vec![String::from("2014-07-30")],
            },
            StationScheduleRequest {
                station_id: String::from("10002"),
                dates: Vec::new(),
            },
        ];

        // Act
        let schedules = client.get_schedules(&requests).await.unwrap();

        // Assert
        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].station_id, "10001");
        assert_eq!(schedules[0].programs.len(), 2);
        assert!(schedules[0].programs[0].new);
        assert_eq!(
            schedules[0].programs[0].syndication.as_ref().unwrap().kind,
            "st1"
        );
        assert_eq!(schedules[1].station_id, "10002");
        assert_eq!(schedules[1].programs.len(), 1);
    }

    #[tokio::test]
    async fn test_get_schedules_rejects_line_delimited_reply() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("POST"))
            .and(path("/20141201/schedules"))
            .respond_with(ResponseTemplate::new(200).set_body_string(concat!(
                r#"{"stationID":"10001","programs":[]}"#,
                "\n",
                r#"{"stationID":"10002","programs":[]}"#,
            )))
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let result = client.get_schedules(&[]).await;

        // Assert
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[tokio::test]
    async fn test_get_last_modified_nested_map() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("POST"))
            .and(path("/20141201/schedules/md5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"20454":{"2024-05-01":{"code":0,"message":"OK","lastModified":"2024-04-30T12:00:00Z","md5":"abc"}}}"#,
            ))
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let modified = client
            .get_last_modified(&[StationScheduleRequest {
                station_id: String::from("20454"),
                dates: Vec::new(),
            }])
            .await
            .unwrap();

        // Assert
        assert_eq!(modified["20454"]["2024-05-01"].md5, "abc");
    }

    #[tokio::test]
    async fn test_get_program_info_requests_compression() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("POST"))
            .and(path("/20141201/programs"))
            .and(header_regex("accept-encoding", "deflate"))
            .and(body_json(serde_json::json!(["EP000000060003"])))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"programID":"EP000000060003","titles":[{"title120":"Example"}],"entityType":"Episode","hasImageArtwork":true}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let programs = client
            .get_program_info(&[String::from("EP000000060003")])
            .await
            .unwrap();

        // Assert
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].show_id().as_deref(), Some("SH000000060000"));
    }

    #[tokio::test]
    async fn test_artwork_batches_preserve_order() {
        // Arrange
        let server = MockServer::start().await;
        let sizes = Arc::new(Mutex::new(Vec::new()));
        Mock::given(method("POST"))
            .and(path("/20141201/metadata/programs"))
            .respond_with(ArtworkEcho {
                sizes: Arc::clone(&sizes),
                calls: AtomicUsize::new(0),
                fail_on: None,
            })
            .expect(3)
            .mount(&server)
            .await;
        let client = test_builder(&server).build().unwrap();
        let ids = program_ids(1200);

        // Act
        let artwork = client.get_artwork_for_program_ids(&ids).await.unwrap();

        // Assert
        assert_eq!(*sizes.lock().unwrap(), vec![500, 500, 200]);
        assert_eq!(artwork.len(), 1200);
        assert!(
            artwork
                .iter()
                .zip(&ids)
                .all(|(entry, id)| &entry.program_id == id)
        );
    }

    #[tokio::test]
    async fn test_failing_batch_fails_whole_call() {
        // Arrange
        let server = MockServer::start().await;
        let sizes = Arc::new(Mutex::new(Vec::new()));
        Mock::given(method("POST"))
            .and(path("/20141201/metadata/programs"))
            .respond_with(ArtworkEcho {
                sizes: Arc::clone(&sizes),
                calls: AtomicUsize::new(0),
                fail_on: Some(2),
            })
            .expect(2)
            .mount(&server)
            .await;
        let client = test_builder(&server).build().unwrap();

        // Act
        let result = client.get_artwork_for_program_ids(&program_ids(1200)).await;

        // Assert
        assert_eq!(
            result.unwrap_err().service_code(),
            Some(ErrorCode::ImageNotFound)
        );
        assert_eq!(*sizes.lock().unwrap(), vec![500, 500]);
    }

    #[tokio::test]
    async fn test_custom_batch_limits_and_map_merge() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("POST"))
            .and(path("/20141201/metadata/description"))
            .and(body_json(serde_json::json!(["SH1", "SH2"])))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"SH1":{"code":0,"description100":"one"},"SH2":{"code":0,"description100":"two"}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/20141201/metadata/description"))
            .and(body_json(serde_json::json!(["SH3"])))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"SH3":{"code":6000,"description100":""}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_builder(&server)
            .batch_limits(BatchLimits {
                program_info: 2,
                metadata: 2,
            })
            .connect()
            .await
            .unwrap();
        let ids = vec![String::from("SH1"), String::from("SH2"), String::from("SH3")];

        // Act
        let descriptions = client.get_program_descriptions(&ids).await.unwrap();

        // Assert
        assert_eq!(descriptions.len(), 3);
        assert_eq!(descriptions["SH2"].description100, "two");
        assert_eq!(descriptions["SH3"].code, ErrorCode::InvalidProgramId);
    }

    #[tokio::test]
    async fn test_empty_id_list_sends_nothing() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;
        let client = test_builder(&server).build().unwrap();

        // Act
        let artwork = client.get_artwork_for_program_ids(&[]).await.unwrap();

        // Assert
        assert!(artwork.is_empty());
    }

    #[tokio::test]
    async fn test_get_language_cross_reference() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("POST"))
            .and(path("/20141201/xref"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"EP000000060003":[{"programID":"EP000000060003","titleLanguage":"es","descriptionLanguage":"es"}]}"#,
            ))
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let xref = client
            .get_language_cross_reference(&[String::from("EP000000060003")])
            .await
            .unwrap();

        // Assert
        assert_eq!(xref["EP000000060003"][0].title_language, "es");
    }

    #[tokio::test]
    async fn test_automap_and_submit_send_raw_body() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        let scan = br#"{"1":"WCBS","2":"WNBC"}"#;
        Mock::given(method("POST"))
            .and(path("/20141201/map/lineup"))
            .and(body_json(serde_json::json!({"1": "WCBS", "2": "WNBC"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"USA-NY67791-X":2}"#),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/20141201/map/lineup/USA-NY67791-X"))
            .and(header_exists("token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":0}"#))
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let matches = client.automap_lineup(scan).await.unwrap();
        let submitted = client.submit_lineup(scan, "USA-NY67791-X").await;

        // Assert
        assert_eq!(matches["USA-NY67791-X"], 2);
        assert!(submitted.is_ok());
    }

    #[tokio::test]
    async fn test_get_image_relative_and_absolute() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("GET"))
            .and(path("/20141201/image/assets/p1.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bucket/p2.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50]))
            .expect(1)
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let relative = client.get_image("assets/p1.jpg").await.unwrap();
        let absolute = client
            .get_image(&format!("{}/bucket/p2.jpg", server.uri()))
            .await
            .unwrap();

        // Assert
        assert_eq!(relative, vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(absolute, vec![0x89, 0x50]);
    }

    #[tokio::test]
    async fn test_artwork_by_root_and_celebrity() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/20141201/metadata/programs/SH00000006"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"uri":"assets/p1.jpg","width":"240","height":"360","primary":"true"}]"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/20141201/metadata/celebrity/12345"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"uri":"assets/c1.jpg","category":"Photo-headshot"}]"#,
            ))
            .mount(&server)
            .await;
        let client = test_builder(&server).build().unwrap();

        // Act
        let root = client.get_artwork_for_root_id("SH00000006").await.unwrap();
        let celebrity = client.get_celebrity_artwork("12345").await.unwrap();

        // Assert
        assert_eq!(root[0].width.get(), 240);
        assert!(root[0].primary.get());
        assert_eq!(celebrity[0].uri, "assets/c1.jpg");
    }

    #[tokio::test]
    async fn test_available_endpoints() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/20141201/available"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"type":"COUNTRIES","description":"List of countries","uri":"/20141201/available/countries"}]"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/20141201/available/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"North America":[{"fullName":"United States","shortName":"USA","postalCodeExample":"12345","postalCode":"/\\d{5}/"}]}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/20141201/available/transmitters/GBR"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"Aberdeen":"GBR-1000014-DEFAULT"}"#),
            )
            .mount(&server)
            .await;
        let client = test_builder(&server).build().unwrap();

        // Act
        let services = client.get_available_services().await.unwrap();
        let countries = client.get_available_countries().await.unwrap();
        let transmitters = client.get_available_transmitters("GBR").await.unwrap();

        // Assert
        assert_eq!(services[0].kind, "COUNTRIES");
        assert_eq!(countries["North America"][0].short_name, "USA");
        assert_eq!(transmitters["Aberdeen"], "GBR-1000014-DEFAULT");
    }

    #[tokio::test]
    async fn test_still_running() {
        // Arrange
        let server = MockServer::start().await;
        mount_token(&server, "abc", 1).await;
        Mock::given(method("GET"))
            .and(path("/20141201/metadata/stillRunning/SP000000000001"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"programID":"SP000000000001","isComplete":true,"result":{"homeTeam":{"name":"Home","score":"3"}}}"#,
            ))
            .mount(&server)
            .await;
        let client = connect(&server).await;

        // Act
        let running = client
            .get_program_still_running("SP000000000001")
            .await
            .unwrap();

        // Assert
        assert!(running.is_complete);
        assert!(running.result.home_team.is_some());
    }
}
