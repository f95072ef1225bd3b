use std::string::String;

use crate::config::Env;

#[derive(Debug, Clone, PartialEq)]
pub struct AmqpConfig {
    pub uri: String,
    pub queue_name: String,
    pub exchange: String,
    pub routing_key: String,
    pub consumer_tag: String,
    pub content_type: String,
}

impl AmqpConfig {
    pub fn new(env: &Env) -> Self {
        Self {
            uri: env.amqp_uri.clone(),
            queue_name: env.amqp_queue_name.clone(),
            exchange: env.amqp_exchange.clone(),
            routing_key: env.amqp_routing_key.clone(),
            consumer_tag: env.amqp_consumer_tag.clone(),
            content_type: env.amqp_content_type.clone(),
        }
    }
}
