//! Render descriptors of sink plugins and their sub-configurations.

use super::descriptor::{Block, Describe, Descriptor};
use super::section::Section;
use crate::error::Result;
use crate::selector::{Clause, Polarity};
use logroute_model::output::{
    Buffer, Format, HttpAuth, HttpOutput, KafkaOutput, NullOutput, S3Output, SumologicOutput,
};
use logroute_model::SinkConfig;

/// Renders `sink` as a `<match **>` plugin block with the given `@id`.
///
/// # Errors
///
/// Returns [`crate::Error::Internal`] if a required parameter is empty.
pub fn sink_section(sink: &SinkConfig, id: &str) -> Result<Section> {
    let mut d = Descriptor::new(Section::new("match").with_arg("**"));
    d.always("@type", sink.plugin_type()).always("@id", id);
    match sink {
        SinkConfig::Null(c) => c.describe(&mut d),
        SinkConfig::Sumologic(c) => c.describe(&mut d),
        SinkConfig::Http(c) => c.describe(&mut d),
        SinkConfig::S3(c) => c.describe(&mut d),
        SinkConfig::Kafka(c) => c.describe(&mut d),
    }
    d.finish()
}

impl Describe for NullOutput {
    fn describe(&self, _d: &mut Descriptor) {}
}

impl Describe for SumologicOutput {
    fn describe(&self, d: &mut Descriptor) {
        d.optional("data_type", self.data_type.as_deref())
            .optional("log_format", self.log_format.as_deref())
            .optional("metric_data_format", self.metric_data_format.as_deref())
            .optional("source_category", self.source_category.as_deref())
            .required("source_name", &self.source_name)
            .optional("endpoint", self.endpoint.as_deref())
            .optional("log_key", self.log_key.as_deref())
            .optional("source_category_prefix", self.source_category_prefix.as_deref())
            .optional("source_host", self.source_host.as_deref())
            .optional("open_timeout", self.open_timeout.as_ref())
            .optional("add_timestamp", self.add_timestamp.as_ref())
            .optional("proxy_uri", self.proxy_uri.as_deref());
    }
}

impl Describe for HttpOutput {
    fn describe(&self, d: &mut Descriptor) {
        d.required("endpoint", &self.endpoint)
            .optional("http_method", self.http_method.as_deref())
            .optional("proxy", self.proxy.as_deref())
            .optional("content_type", self.content_type.as_deref())
            .always("json_array", &self.json_array)
            .optional("tls_verify_mode", self.tls_verify_mode.as_deref())
            .joined("retryable_response_codes", &self.retryable_response_codes, ",")
            .map("headers", &self.headers)
            .section(self.auth.as_ref())
            .section(self.format.as_ref())
            .section(self.buffer.as_ref());
    }
}

impl Describe for S3Output {
    fn describe(&self, d: &mut Descriptor) {
        d.optional("aws_key_id", self.aws_key_id.as_deref())
            .optional("aws_sec_key", self.aws_sec_key.as_deref())
            .required("s3_bucket", &self.s3_bucket)
            .optional("s3_region", self.s3_region.as_deref())
            .optional("s3_endpoint", self.s3_endpoint.as_deref())
            .optional("path", self.path.as_deref())
            .optional("s3_object_key_format", self.s3_object_key_format.as_deref())
            .optional("store_as", self.store_as.as_deref())
            .optional("check_object", self.check_object.as_ref())
            .optional("force_path_style", self.force_path_style.as_ref())
            .section(self.format.as_ref())
            .section(self.buffer.as_ref());
    }
}

impl Describe for KafkaOutput {
    fn describe(&self, d: &mut Descriptor) {
        d.joined("brokers", &self.brokers, ",")
            .optional("default_topic", self.default_topic.as_deref())
            .optional("topic_key", self.topic_key.as_deref())
            .optional("partition_key", self.partition_key.as_deref())
            .always("use_default_for_unknown_topic", &self.use_default_for_unknown_topic)
            .optional("required_acks", self.required_acks.as_ref())
            .optional("compression_codec", self.compression_codec.as_deref())
            .optional("ssl_verify_hostname", self.ssl_verify_hostname.as_ref())
            .section(self.format.as_ref())
            .section(self.buffer.as_ref());
    }
}

impl Block for Buffer {
    fn header(&self) -> Section {
        Section::new("buffer").with_arg(self.chunk_keys())
    }
}

impl Describe for Buffer {
    fn describe(&self, d: &mut Descriptor) {
        d.always("@type", self.plugin_type())
            .optional("path", self.path.as_deref())
            .optional("chunk_limit_size", self.chunk_limit_size.as_deref())
            .optional("total_limit_size", self.total_limit_size.as_deref())
            .optional("flush_mode", self.flush_mode.as_deref())
            .optional("flush_interval", self.flush_interval.as_deref())
            .optional("flush_thread_count", self.flush_thread_count.as_ref())
            .optional("timekey", self.timekey.as_deref())
            .optional("timekey_wait", self.timekey_wait.as_deref())
            .optional("timekey_use_utc", self.timekey_use_utc.as_ref())
            .optional("retry_forever", self.retry_forever.as_ref())
            .optional("retry_max_times", self.retry_max_times.as_ref())
            .optional("overflow_action", self.overflow_action.as_deref());
    }
}

impl Block for Format {
    fn header(&self) -> Section {
        Section::new("format")
    }
}

impl Describe for Format {
    fn describe(&self, d: &mut Descriptor) {
        d.required("@type", &self.format_type)
            .optional("add_newline", self.add_newline.as_ref())
            .optional("message_key", self.message_key.as_deref());
    }
}

impl Block for HttpAuth {
    fn header(&self) -> Section {
        Section::new("auth")
    }
}

impl Describe for HttpAuth {
    fn describe(&self, d: &mut Descriptor) {
        d.always("method", "basic")
            .required("username", &self.username)
            .required("password", &self.password);
    }
}

/// A predicate clause renders as a label router `<match>` block.
impl Block for Clause {
    fn header(&self) -> Section {
        Section::new("match")
    }
}

impl Describe for Clause {
    fn describe(&self, d: &mut Descriptor) {
        d.sorted_pairs("labels", &self.labels)
            .joined("namespaces", &self.namespaces, ",");
        if self.polarity == Polarity::Exclude {
            d.always("negate", &true);
        }
    }
}
