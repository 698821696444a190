//! Video endpoints: upload, metadata, thumbnails, delayed publication,
//! show relations and play options.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde_json::Value;

use rt_core::constants::{self, endpoints};
use rt_core::error::{RtError, RtResult};
use rt_models::{DynamicModel, Model, PublicationResponse, VideoInfo, VideoRelation, GENERIC};

use crate::endpoints::require;
use crate::transport::{ApiCall, Transport};

/// Wire format of publication timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parameters for uploading a video by URL.
#[derive(Debug, Clone, Serialize)]
pub struct UploadParams {
    /// Where the API fetches the source file from.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(serialize_with = "flag")]
    pub is_hidden: bool,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_report: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converter_params: Option<String>,
    /// Channel to upload into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<i64>,
}

impl UploadParams {
    /// Hidden upload into the default category.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
            is_hidden: true,
            category_id: constants::DEFAULT_UPLOAD_CATEGORY,
            callback_url: None,
            errback_url: None,
            query_fields: None,
            extra: None,
            quality_report: None,
            converter_params: None,
            author: None,
        }
    }
}

/// Editable video metadata. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Category id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "optional_flag")]
    pub is_hidden: Option<bool>,
    /// Channel id to move the video to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<i64>,
}

impl VideoUpdate {
    /// Editable fields of a fetched video.
    pub fn from_info(info: &VideoInfo) -> Self {
        Self {
            title: info.title().map(str::to_owned),
            category: info.category().and_then(|c| c.get_i64("id")),
            description: info.get_str("description").map(str::to_owned),
            is_hidden: info.get_bool("is_hidden"),
            author: info.author().and_then(|a| a.get_i64("id")),
        }
    }
}

/// Client-side context for play options.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub quality: Option<String>,
    /// Viewer's user agent, sent instead of the client's.
    pub user_agent: Option<String>,
    /// Viewer's IP, sent as `X-Real-IP`.
    pub user_ip: Option<String>,
    pub referer: Option<String>,
}

fn flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

fn optional_flag<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => flag(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// `None` for an absent or empty body, or a 404.
fn optional<M: Model>(result: RtResult<Value>) -> RtResult<Option<M>> {
    match result {
        Ok(value) if is_empty(&value) => Ok(None),
        Ok(value) => Ok(Some(M::from_value(value))),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Video operations.
pub struct Video<'a> {
    transport: &'a Transport,
}

impl<'a> Video<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Upload a video by URL. Returns the new video's id when the API
    /// reports one.
    pub fn upload(&self, params: &UploadParams) -> RtResult<Option<String>> {
        require("url", &params.url)?;
        let call = ApiCall::post(endpoints::VIDEO).json_body(params)?;
        let result = self.transport.call(call)?;
        Ok(result.get("video_id").and_then(id_string))
    }

    /// Delete a video. True iff the API answered 204.
    pub fn delete_video(&self, video_id: &str) -> RtResult<bool> {
        require("video_id", video_id)?;
        let status = self
            .transport
            .call_status(ApiCall::delete(format!("{}{video_id}", endpoints::VIDEO)))?;
        Ok(status == constants::STATUS_NO_CONTENT)
    }

    pub fn get_video(&self, video_id: &str) -> RtResult<VideoInfo> {
        require("video_id", video_id)?;
        let result = self
            .transport
            .call(ApiCall::get(format!("{}{video_id}/", endpoints::VIDEO)))?;
        Ok(VideoInfo::from_value(result))
    }

    /// Replace video metadata. `title` and `category` are required.
    pub fn put_video(&self, video_id: &str, update: &VideoUpdate) -> RtResult<VideoInfo> {
        require("video_id", video_id)?;
        require("title", update.title.as_deref().unwrap_or_default())?;
        if update.category.map_or(true, |c| c == 0) {
            return Err(RtError::InvalidArgument("'category' must be specified".into()));
        }
        let call = ApiCall::put(format!("{}{video_id}/", endpoints::VIDEO)).json_body(update)?;
        Ok(VideoInfo::from_value(self.transport.call(call)?))
    }

    /// Update only the fields set in `update`.
    pub fn patch_video(&self, video_id: &str, update: &VideoUpdate) -> RtResult<VideoInfo> {
        require("video_id", video_id)?;
        let call = ApiCall::patch(format!("{}{video_id}", endpoints::VIDEO)).json_body(update)?;
        Ok(VideoInfo::from_value(self.transport.call(call)?))
    }

    /// Upload a thumbnail image. Returns its URL when the API reports one.
    pub fn add_thumb(&self, video_id: &str, file: &Path) -> RtResult<Option<String>> {
        require("video_id", video_id)?;
        let call = ApiCall::post(format!("{}{video_id}/thumbnail/", endpoints::VIDEO)).file("file", file);
        let result = self.transport.call(call)?;
        Ok(result
            .get("thumbnail_url")
            .and_then(Value::as_str)
            .map(str::to_owned))
    }

    /// Delayed publication settings, `None` when there are none.
    pub fn get_publication(&self, video_id: &str) -> RtResult<Option<PublicationResponse>> {
        require("video_id", video_id)?;
        optional(
            self.transport
                .call(ApiCall::get(format!("{}{video_id}/", endpoints::PUBLICATION))),
        )
    }

    /// Schedule the video to open at `timestamp`.
    pub fn add_publication(&self, video_id: &str, timestamp: NaiveDateTime) -> RtResult<PublicationResponse> {
        require("video_id", video_id)?;
        let call = publication(ApiCall::post(endpoints::PUBLICATION), video_id, timestamp);
        Ok(PublicationResponse::from_value(self.transport.call(call)?))
    }

    pub fn put_publication(&self, video_id: &str, timestamp: NaiveDateTime) -> RtResult<PublicationResponse> {
        require("video_id", video_id)?;
        let call = publication(
            ApiCall::put(format!("{}{video_id}/", endpoints::PUBLICATION)),
            video_id,
            timestamp,
        );
        Ok(PublicationResponse::from_value(self.transport.call(call)?))
    }

    pub fn patch_publication(&self, video_id: &str, timestamp: NaiveDateTime) -> RtResult<PublicationResponse> {
        require("video_id", video_id)?;
        let call = publication(
            ApiCall::patch(format!("{}{video_id}/", endpoints::PUBLICATION)),
            video_id,
            timestamp,
        );
        Ok(PublicationResponse::from_value(self.transport.call(call)?))
    }

    /// Cancel a delayed publication.
    pub fn delete_publication(&self, video_id: &str) -> RtResult<()> {
        require("video_id", video_id)?;
        self.transport
            .call(ApiCall::delete(format!("{}{video_id}/", endpoints::PUBLICATION)))?;
        Ok(())
    }

    /// Show metadata of a video, `None` when the video is not in a show.
    pub fn get_related_show_meta(&self, video_id: &str) -> RtResult<Option<VideoRelation>> {
        require("video_id", video_id)?;
        optional(
            self.transport
                .call(ApiCall::get(format!("{}{video_id}/", endpoints::CONTENT_TVS))),
        )
    }

    pub fn add_related_show_meta(&self, relation: &VideoRelation) -> RtResult<VideoRelation> {
        require("video_id", relation.video_id().unwrap_or_default())?;
        let call = ApiCall::post(endpoints::CONTENT_TVS).json_body(relation)?;
        Ok(VideoRelation::from_value(self.transport.call(call)?))
    }

    pub fn put_related_show_meta(&self, relation: &VideoRelation) -> RtResult<VideoRelation> {
        let video_id = relation.video_id().unwrap_or_default();
        require("video_id", video_id)?;
        let call = ApiCall::put(format!("{}{video_id}/", endpoints::CONTENT_TVS)).json_body(relation)?;
        Ok(VideoRelation::from_value(self.transport.call(call)?))
    }

    pub fn patch_related_show_meta(&self, relation: &VideoRelation) -> RtResult<VideoRelation> {
        let video_id = relation.video_id().unwrap_or_default();
        require("video_id", video_id)?;
        let call = ApiCall::patch(format!("{}{video_id}/", endpoints::CONTENT_TVS)).json_body(relation)?;
        Ok(VideoRelation::from_value(self.transport.call(call)?))
    }

    /// Player options (stream URLs, ads, restrictions) as seen by a
    /// particular viewer.
    pub fn get_play_options(&self, video_id: &str, options: &PlayOptions) -> RtResult<DynamicModel> {
        require("video_id", video_id)?;
        let mut call = ApiCall::get(format!("{}{video_id}/", endpoints::PLAY_OPTIONS));
        if let Some(quality) = &options.quality {
            call = call.query("quality", quality);
        }
        if let Some(referer) = &options.referer {
            call = call.query("referer", referer);
        }
        if let Some(user_agent) = &options.user_agent {
            call = call.header("User-Agent", user_agent.as_str());
        }
        if let Some(ip) = &options.user_ip {
            call = call.header(constants::REAL_IP_HEADER, ip.as_str());
        }
        Ok(DynamicModel::from_value(GENERIC, self.transport.call(call)?))
    }
}

fn publication(call: ApiCall, video_id: &str, timestamp: NaiveDateTime) -> ApiCall {
    call.param("video", video_id)
        .param("timestamp", timestamp.format(TIMESTAMP_FORMAT).to_string())
}

/// Video ids come back as strings, but tolerate numbers.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_params_defaults() {
        let params = UploadParams::new("https://example.com/clip.mp4");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            json!({"url": "https://example.com/clip.mp4", "is_hidden": 1, "category_id": 13})
        );
    }

    #[test]
    fn test_upload_params_optional_fields() {
        let mut params = UploadParams::new("https://example.com/clip.mp4");
        params.title = Some("Clip".into());
        params.is_hidden = false;
        params.author = Some(77);
        params.quality_report = Some(true);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["title"], "Clip");
        assert_eq!(json["is_hidden"], 0);
        assert_eq!(json["author"], 77);
        assert_eq!(json["quality_report"], true);
        assert!(json.get("callback_url").is_none());
    }

    #[test]
    fn test_video_update_from_info() {
        let info = VideoInfo::from_value(json!({
            "id": "abc",
            "title": "Old title",
            "is_hidden": true,
            "category": {"id": 4, "name": "Music"},
            "author": {"id": 12}
        }));
        let update = VideoUpdate::from_info(&info);
        assert_eq!(update.title.as_deref(), Some("Old title"));
        assert_eq!(update.category, Some(4));
        assert_eq!(update.author, Some(12));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"title": "Old title", "category": 4, "is_hidden": 1, "author": 12})
        );
    }

    #[test]
    fn test_empty_update_serializes_to_empty_object() {
        assert_eq!(serde_json::to_value(VideoUpdate::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_optional_results() {
        let none: Option<PublicationResponse> = optional(Ok(Value::Null)).unwrap();
        assert!(none.is_none());
        let none: Option<PublicationResponse> = optional(Ok(json!({}))).unwrap();
        assert!(none.is_none());
        let none: Option<PublicationResponse> =
            optional(Err(RtError::from_status(404, None))).unwrap();
        assert!(none.is_none());
        let some: Option<PublicationResponse> = optional(Ok(json!({"video": "abc"}))).unwrap();
        assert_eq!(some.unwrap().video(), Some("abc"));
        assert!(optional::<PublicationResponse>(Err(RtError::from_status(403, None))).is_err());
    }

    #[test]
    fn test_id_string() {
        assert_eq!(id_string(&json!("9a4b")), Some("9a4b".to_string()));
        assert_eq!(id_string(&json!(42)), Some("42".to_string()));
        assert_eq!(id_string(&json!("")), None);
        assert_eq!(id_string(&Value::Null), None);
    }
}
