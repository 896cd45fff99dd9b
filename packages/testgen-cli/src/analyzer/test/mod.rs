mod body_spec;
